// ── Core error types ──
//
// User-facing errors from vouchly-core. The `Display` of each variant is
// the message a view shows in its error notice, so API failures keep the
// status line exactly as the API crate formats it.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::FieldErrors;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    /// The server answered with a 404.
    #[error("{message}")]
    NotFound { message: String },

    /// Any other non-2xx answer or transport failure after connecting.
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    /// A 2xx answer whose body could not be understood.
    #[error("Invalid response from API: {message}")]
    InvalidResponse { message: String },

    // ── Local validation ─────────────────────────────────────────────
    #[error("Validation failed: {errors}")]
    ValidationFailed { errors: FieldErrors },

    #[error("Count must be between 1 and 100,000")]
    CountOutOfRange { count: u64 },

    // ── Export ───────────────────────────────────────────────────────
    #[error("Failed to save {}: {reason}", .path.display())]
    Export { path: PathBuf, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vouchly_api::Error> for CoreError {
    fn from(err: vouchly_api::Error) -> Self {
        match err {
            vouchly_api::Error::Transport(ref e) if e.is_connect() => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                reason: e.to_string(),
            },
            vouchly_api::Error::Transport(ref e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            status_err @ vouchly_api::Error::Status { .. } => {
                let message = status_err.to_string();
                match status_err.status() {
                    Some(404) => CoreError::NotFound { message },
                    status => CoreError::Api { message, status },
                }
            }
            vouchly_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidResponse { message }
            }
            vouchly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid API URL: {e}"),
            },
            vouchly_api::Error::Tls(message) => CoreError::Config { message },
        }
    }
}
