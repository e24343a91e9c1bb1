//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use vouchly_config::ConfigError;
use vouchly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the API at {url}")]
    #[diagnostic(
        code(vouchly::connection_failed),
        help(
            "Check that the campaign API is running and reachable.\n\
             Reason: {reason}\n\
             Set the origin with --api-url or: vouchly config init --api-url <URL>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(vouchly::not_found),
        help("Run: vouchly campaigns list to see available campaigns")
    )]
    NotFound { message: String },

    #[error("Campaign {id} has no vouchers to download")]
    #[diagnostic(
        code(vouchly::nothing_to_export),
        help("Generate some first: vouchly vouchers generate {id} --count <N>")
    )]
    NothingToExport { id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(vouchly::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vouchly::validation))]
    Validation { field: String, reason: String },

    #[error("Campaign is not valid")]
    #[diagnostic(code(vouchly::invalid_campaign), help("{details}"))]
    InvalidCampaign { details: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(vouchly::config),
        help("Inspect the active configuration with: vouchly config show")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vouchly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Export ───────────────────────────────────────────────────────
    #[error("Failed to save {path}: {reason}")]
    #[diagnostic(code(vouchly::export), help("Choose another directory with --dir"))]
    Export { path: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(vouchly::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(vouchly::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidCampaign { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::NotFound { message } => CliError::NotFound { message },

            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                CliError::Api { message }
            }

            e @ CoreError::InvalidResponse { .. } => CliError::Api {
                message: e.to_string(),
            },

            CoreError::ValidationFailed { errors } => CliError::InvalidCampaign {
                details: errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },

            e @ CoreError::CountOutOfRange { .. } => CliError::Validation {
                field: "count".into(),
                reason: e.to_string(),
            },

            CoreError::Export { path, reason } => CliError::Export {
                path: path.display().to_string(),
                reason,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouchly_core::{CampaignDraft, FormField};

    #[test]
    fn exit_codes_follow_error_kind() {
        let not_found: CliError = CoreError::NotFound {
            message: "API Error: 404 Not Found".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(not_found.to_string(), "API Error: 404 Not Found");

        let conn: CliError = CoreError::ConnectionFailed {
            url: "http://localhost:3000".into(),
            reason: "refused".into(),
        }
        .into();
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let count: CliError = CoreError::CountOutOfRange { count: 0 }.into();
        assert_eq!(count.exit_code(), exit_code::USAGE);
        assert_eq!(
            count.to_string(),
            "Invalid value for count: Count must be between 1 and 100,000"
        );
    }

    #[test]
    fn field_errors_become_help_lines() {
        let draft = CampaignDraft {
            name: String::new(),
            ..CampaignDraft::default()
        };
        let errors = draft.validate();
        assert!(errors.get(FormField::Name).is_some());

        let err: CliError = CoreError::ValidationFailed { errors }.into();
        let CliError::InvalidCampaign { details } = &err else {
            panic!("expected InvalidCampaign, got {err:?}");
        };
        assert_eq!(details, "name: Campaign name is required");
    }
}
