//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a distinct exit code per category.

use miette::Diagnostic;
use thiserror::Error;

use unidesk_config::ConfigError;
use unidesk_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const ADVISOR: i32 = 8;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Backend ──────────────────────────────────────────────────────
    #[error("Could not reach the records backend: {reason}")]
    #[diagnostic(
        code(unidesk::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Override the address with --api-url or `unidesk config set api_url <url>`."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(unidesk::not_found),
        help("Run: unidesk {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unidesk::validation))]
    Validation { field: String, reason: String },

    #[error("The backend returned an unexpected response: {message}")]
    #[diagnostic(
        code(unidesk::decode),
        help("The backend and this client disagree on the record format. Re-run with -vv for details.")
    )]
    Decode { message: String },

    // ── Advisor ──────────────────────────────────────────────────────
    #[error("AI advisor unavailable: {message}")]
    #[diagnostic(
        code(unidesk::advisor),
        help(
            "Set GEMINI_API_KEY, or store a key with: unidesk config set-ai-key\n\
             A profile may also name its own variable via ai_api_key_env."
        )
    )]
    Advisor { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(unidesk::config),
        help("Inspect the active settings with: unidesk config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(unidesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(unidesk::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Advisor { .. } => exit_code::ADVISOR,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Decode { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Network { reason, status } => CliError::ConnectionFailed {
                reason: match status {
                    Some(code) => format!("HTTP {code}: {reason}"),
                    None => reason,
                },
            },
            CoreError::NotFound { entity, id } => CliError::NotFound {
                list_command: format!("{entity}s list"),
                resource_type: entity,
                identifier: id,
            },
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Decode { message } => CliError::Decode { message },
            CoreError::AiUnavailable { message } => CliError::Advisor { message },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Config {
                message: format!("invalid {field}: {reason}"),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
