// ── Core error types ──
//
// User-facing errors from unidesk-core. Consumers never see raw HTTP or
// JSON failures: the `From<unidesk_api::Error>` impl and the gateway's
// classification fold them into the five failure kinds below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Remote failures ──────────────────────────────────────────────
    /// The backend could not be reached, timed out, or failed upstream.
    #[error("Network error: {reason}")]
    Network { reason: String, status: Option<u16> },

    /// The backend does not know this record.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The payload was rejected, or a form is missing required fields.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The backend answered with something that is not the expected shape.
    #[error("Unexpected response: {message}")]
    Decode { message: String },

    // ── Advisory ─────────────────────────────────────────────────────
    #[error("AI advisor unavailable: {message}")]
    AiUnavailable { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unidesk_api::Error> for CoreError {
    fn from(err: unidesk_api::Error) -> Self {
        if err.is_not_found() {
            return CoreError::NotFound {
                entity: "resource".into(),
                id: String::new(),
            };
        }
        if err.is_rejected_payload() {
            return CoreError::Validation {
                message: err.to_string(),
            };
        }

        match err {
            unidesk_api::Error::Transport(ref e) => CoreError::Network {
                reason: if e.is_timeout() {
                    "request timed out".into()
                } else {
                    e.to_string()
                },
                status: e.status().map(|s| s.as_u16()),
            },
            unidesk_api::Error::Tls(msg) => CoreError::Network {
                reason: format!("TLS error: {msg}"),
                status: None,
            },
            unidesk_api::Error::Api { status, message } => CoreError::Network {
                reason: format!("backend answered HTTP {status}: {message}"),
                status: Some(status),
            },
            unidesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            unidesk_api::Error::InvalidApiKey => CoreError::AiUnavailable {
                message: "the AI API key was rejected".into(),
            },
            unidesk_api::Error::GenAi { message, .. } => CoreError::AiUnavailable { message },
            unidesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
