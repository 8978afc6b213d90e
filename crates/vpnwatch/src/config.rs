//! GlobalOpts-aware wrappers over the shared config crate.
//!
//! Profile selection, device/mail config resolution, and the interactive
//! password fallback for terminal sessions.

use std::io::IsTerminal;
use std::path::PathBuf;

use secrecy::SecretString;

use vpnwatch_core::{DeviceConfig, MailConfig};

pub use vpnwatch_config::{
    Config, ConfigError, Defaults, KEYRING_SERVICE, MailSettings, Profile, config_path,
    load_config_or_default, save_config,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name in effect: CLI flag, then config default, then
/// literally "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Look up a profile or fail with the available names.
pub fn require_profile<'a>(cfg: &'a Config, name: &str) -> Result<&'a Profile, CliError> {
    cfg.profiles.get(name).ok_or_else(|| CliError::ProfileNotFound {
        name: name.to_owned(),
        available: available_profiles(cfg),
    })
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
        names.sort();
        names.join(", ")
    }
}

/// Resolve a `DeviceConfig` from the profile. When no stored credential
/// is found and we are attached to a terminal, fall back to prompting —
/// the interactive workflows historically asked for the password.
pub fn resolve_device(
    profile: &Profile,
    name: &str,
    defaults: &Defaults,
) -> Result<DeviceConfig, CliError> {
    match vpnwatch_config::device_config(profile, name, defaults.timeout) {
        Ok(device) => Ok(device),
        Err(ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
            let password = rpassword::prompt_password(format!(
                "Password for {}@{}: ",
                profile.username, profile.host
            ))
            .map_err(|e| CliError::Validation {
                field: "password".into(),
                reason: format!("prompt failed: {e}"),
            })?;
            let timeout = profile.timeout.unwrap_or(defaults.timeout);
            Ok(
                DeviceConfig::new(
                    profile.host.clone(),
                    profile.username.clone(),
                    SecretString::from(password),
                )
                .with_port(profile.port)
                .with_timeout(std::time::Duration::from_secs(timeout)),
            )
        }
        Err(err) => Err(err.into()),
    }
}

/// Resolve a `MailConfig` from the profile's mail settings.
pub fn resolve_mail(mail: &MailSettings, name: &str) -> Result<MailConfig, CliError> {
    vpnwatch_config::mail_config(mail, name).map_err(CliError::from)
}

/// The directory holding daily records: CLI flag, then config default,
/// then the current directory.
pub fn log_dir(flag: Option<PathBuf>, defaults: &Defaults) -> PathBuf {
    flag.or_else(|| defaults.log_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}
