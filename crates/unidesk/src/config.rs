//! Profile resolution: layers global flags over the stored profile and
//! hands the result to `unidesk-config` for translation into a
//! `ClientConfig`.

use clap::ValueEnum;

use unidesk_config::{Config, Profile};
use unidesk_core::ClientConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The active profile with flag overrides applied.
///
/// A profile named explicitly with `--profile` must exist; the implicit
/// default falls back to built-in settings.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    let mut profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<_> = config.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::Config {
                message: format!(
                    "profile '{name}' not found (available: {})",
                    if available.is_empty() {
                        "none".into()
                    } else {
                        available.join(", ")
                    }
                ),
            });
        }
        None => Profile::default(),
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    profile.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(config.defaults.timeout));

    Ok((name, profile))
}

/// Client settings without touching AI credentials.
pub fn client_config(global: &GlobalOpts, config: &Config) -> Result<ClientConfig, CliError> {
    let (_, profile) = effective_profile(global, config)?;
    Ok(unidesk_config::build_client_config(&profile, None)?)
}

/// Client settings with the AI key resolved (env, keyring, plaintext).
pub fn advisor_client_config(global: &GlobalOpts, config: &Config) -> Result<ClientConfig, CliError> {
    let (name, profile) = effective_profile(global, config)?;
    Ok(unidesk_config::profile_to_client_config(&profile, &name)?)
}

/// `--output` if given, else the configured default, else table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.clone().unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}
