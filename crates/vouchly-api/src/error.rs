use thiserror::Error;

use crate::endpoint::Route;

/// Top-level error type for the `vouchly-api` crate.
///
/// Every failure the HTTP surface can produce: transport, non-2xx status,
/// and malformed success bodies. `vouchly-core` maps these into the
/// user-facing `CoreError`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Status ──────────────────────────────────────────────────────
    /// The server answered with a non-2xx status. No structured error
    /// body is parsed; the status line is all the caller gets.
    #[error("{} Error: {status} {status_text}", .route.label())]
    Status {
        status: u16,
        status_text: String,
        route: Route,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reads_like_a_status_line() {
        let err = Error::Status {
            status: 404,
            status_text: "Not Found".into(),
            route: Route::Json,
        };
        assert_eq!(err.to_string(), "API Error: 404 Not Found");
        assert!(err.is_not_found());

        let err = Error::Status {
            status: 500,
            status_text: "Internal Server Error".into(),
            route: Route::Download,
        };
        assert_eq!(err.to_string(), "Download Error: 500 Internal Server Error");
        assert!(!err.is_not_found());
    }
}
