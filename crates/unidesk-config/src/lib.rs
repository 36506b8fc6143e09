//! Shared configuration for the unidesk CLI.
//!
//! TOML profiles, AI key resolution (env + keyring + plaintext), and
//! translation to `unidesk_core::ClientConfig`. The CLI layers its global
//! flags on top of a [`Profile`] before handing it here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use unidesk_api::genai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use unidesk_core::{AdvisorConfig, ClientConfig, DEFAULT_API_URL, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/ai-key`.
pub const KEYRING_SERVICE: &str = "unidesk";

/// Fallback variable consulted for the Gemini key.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("keyring unavailable: {reason}")]
    Keyring { reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<keyring::Error> for ConfigError {
    fn from(err: keyring::Error) -> Self {
        Self::Keyring {
            reason: err.to_string(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    /// Records backend base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Gemini model name (default `gemini-2.5-flash`).
    pub ai_model: Option<String>,

    /// Gemini API base URL.
    pub ai_endpoint: Option<String>,

    /// Gemini API key (plaintext, prefer keyring or env var).
    pub ai_api_key: Option<String>,

    /// Environment variable holding the Gemini API key.
    pub ai_api_key_env: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: None,
            insecure: None,
            ca_cert: None,
            ai_model: None,
            ai_endpoint: None,
            ai_api_key: None,
            ai_api_key_env: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("edu", "unidesk", "unidesk").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("unidesk");
    p
}

// ── Loading & saving ────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. `UNIDESK_` variables override file values,
/// with `__` separating nested keys (`UNIDESK_DEFAULTS__TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("UNIDESK_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config()
        .inspect_err(|e| tracing::debug!(error = %e, "using default configuration"))
        .unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── AI key resolution ───────────────────────────────────────────────

/// Resolve the Gemini key from the process environment, keyring and
/// profile. `None` means the advisor stays disabled.
pub fn resolve_ai_key(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    resolve_ai_key_with(profile, profile_name, |name| std::env::var(name).ok())
}

/// [`resolve_ai_key`] with an explicit environment lookup.
///
/// Order: the profile's `ai_api_key_env` variable, `GEMINI_API_KEY`, the
/// system keyring, then the plaintext `ai_api_key`.
pub fn resolve_ai_key_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    let from_env = profile
        .ai_api_key_env
        .as_deref()
        .and_then(&env)
        .or_else(|| env(GEMINI_KEY_ENV))
        .filter(|v| !v.is_empty());
    if let Some(key) = from_env {
        return Some(SecretString::from(key));
    }

    if let Some(secret) = keyring_entry(profile_name)
        .ok()
        .and_then(|entry| entry.get_password().ok())
    {
        return Some(SecretString::from(secret));
    }

    profile.ai_api_key.clone().map(SecretString::from)
}

/// Store a Gemini key in the system keyring for `profile_name`.
pub fn store_ai_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(key)?;
    Ok(())
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/ai-key"))
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `ClientConfig` from a profile. The advisor is configured only
/// when an AI key resolves.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ClientConfig, ConfigError> {
    build_client_config(profile, resolve_ai_key(profile, profile_name))
}

/// Same as [`profile_to_client_config`] with an already-resolved key.
pub fn build_client_config(
    profile: &Profile,
    ai_key: Option<SecretString>,
) -> Result<ClientConfig, ConfigError> {
    let api_url = parse_url("api_url", &profile.api_url)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let advisor = match ai_key {
        Some(api_key) => Some(AdvisorConfig {
            api_key,
            model: profile
                .ai_model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.into()),
            endpoint: parse_url(
                "ai_endpoint",
                profile.ai_endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
            )?,
        }),
        None => None,
    };

    Ok(ClientConfig {
        api_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        advisor,
    })
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}
