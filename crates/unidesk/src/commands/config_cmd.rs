//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Password};
use secrecy::ExposeSecret;
use serde::Serialize;

use unidesk_config::{Config, Profile};
use unidesk_core::DEFAULT_API_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::validation("interactive", format!("prompt failed: {e}"))
}

/// What `config show` prints: the file as loaded, plaintext keys masked.
#[derive(Serialize)]
struct ShownConfig {
    path: String,
    active_profile: String,
    #[serde(flatten)]
    config: Config,
}

fn mask_secrets(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.ai_api_key.is_some() {
            profile.ai_api_key = Some("********".into());
        }
    }
    cfg
}

fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => profile.api_url = value,
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| CliError::validation("timeout", "must be a number (seconds)"))?,
            );
        }
        "insecure" => {
            profile.insecure = Some(
                value
                    .parse()
                    .map_err(|_| CliError::validation("insecure", "must be 'true' or 'false'"))?,
            );
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "ai_model" | "ai-model" => profile.ai_model = Some(value),
        "ai_endpoint" | "ai-endpoint" => profile.ai_endpoint = Some(value),
        "ai_api_key" | "ai-api-key" => profile.ai_api_key = Some(value),
        "ai_api_key_env" | "ai-api-key-env" => profile.ai_api_key_env = Some(value),
        other => {
            return Err(CliError::validation(
                other,
                format!(
                    "unknown config key '{other}'. Valid keys: api_url, timeout, insecure, \
                     ca_cert, ai_model, ai_endpoint, ai_api_key, ai_api_key_env"
                ),
            ));
        }
    }
    Ok(())
}

fn read_secret(prompt: &str) -> Result<String, CliError> {
    let secret = Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(prompt_err)?;
    if secret.trim().is_empty() {
        return Err(CliError::validation("ai_api_key", "value cannot be empty"));
    }
    Ok(secret)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts, mut cfg: Config) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let path = unidesk_config::config_path();
            eprintln!("unidesk configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("Records backend URL")
                .default(DEFAULT_API_URL.into())
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile {
                api_url,
                ..Profile::default()
            };

            let want_ai = Confirm::new()
                .with_prompt("Configure the Gemini AI advisor?")
                .default(false)
                .interact()
                .map_err(prompt_err)?;
            if want_ai {
                let key = read_secret("Gemini API key")?;
                match unidesk_config::store_ai_key(&profile_name, &key) {
                    Ok(()) => eprintln!("   AI key stored in system keyring"),
                    Err(e) => {
                        tracing::warn!(error = %e, "keyring unavailable, saving key in config");
                        profile.ai_api_key = Some(key);
                    }
                }
            }

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            let path = unidesk_config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: unidesk dashboard");
            Ok(())
        }

        ConfigCommand::Show => {
            let active_profile = config::active_profile_name(global, &cfg);
            let shown = ShownConfig {
                path: unidesk_config::config_path().display().to_string(),
                active_profile,
                config: mask_secrets(cfg),
            };
            let out = output::render_single(
                &global.format(),
                &shown,
                |s| {
                    let body = toml::to_string_pretty(&s.config).unwrap_or_default();
                    format!(
                        "# {}\n# active profile: {}\n\n{body}",
                        s.path, s.active_profile
                    )
                },
                |s| s.active_profile.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &unidesk_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            unidesk_config::save_config(&cfg)?;
            output::notice(&format!("Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::SetAiKey { profile } => {
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let key = read_secret("Gemini API key")?;
            unidesk_config::store_ai_key(&profile_name, &key)?;

            let stored = unidesk_config::resolve_ai_key(
                cfg.profiles.get(&profile_name).unwrap_or(&Profile::default()),
                &profile_name,
            );
            if stored.is_none_or(|s| s.expose_secret() != key) {
                eprintln!("note: an environment variable or plaintext key takes precedence for this profile");
            }
            output::notice(
                &format!("AI key stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}
