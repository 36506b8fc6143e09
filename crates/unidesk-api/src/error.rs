use thiserror::Error;

/// Top-level error type for the `unidesk-api` crate.
///
/// Covers every failure mode of both HTTP surfaces: the records backend and
/// the generative-AI endpoint. `unidesk-core` classifies these into the
/// domain failure taxonomy; nothing above the core ever sees them raw.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error (unreadable or invalid CA certificate).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Records API ─────────────────────────────────────────────────
    /// Non-success HTTP status from the records backend.
    #[error("Records API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Generative AI ───────────────────────────────────────────────
    /// The AI key was rejected or could not be used as a header value.
    #[error("Invalid AI API key")]
    InvalidApiKey,

    /// Non-success status or an empty candidate list from the AI endpoint.
    #[error("Generative AI error: {message}")]
    GenAi {
        message: String,
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this crate retries; callers decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the backend rejected the submitted payload.
    pub fn is_rejected_payload(&self) -> bool {
        matches!(self, Self::Api { status: 400 | 409 | 422, .. })
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::GenAi { status, .. } => *status,
            _ => None,
        }
    }
}
