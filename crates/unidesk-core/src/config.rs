// ── Runtime client configuration ──
//
// Describes *where* the backend and the AI endpoint live and how to talk
// to them. Never touches disk: the CLI builds a `ClientConfig` from its
// profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use unidesk_api::transport::{TlsMode, TransportConfig};

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8089";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Generative-AI settings. Present only when a key was resolved.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: SecretString,
    pub model: String,
    pub endpoint: Url,
}

/// Configuration for one records backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., `http://localhost:8089`).
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    pub advisor: Option<AdvisorConfig>,
}

impl ClientConfig {
    /// Config for `api_url` with default transport settings and no advisor.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            advisor: None,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        }
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
