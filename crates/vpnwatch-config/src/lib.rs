//! Shared configuration for the vpnwatch CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to the core crate's `DeviceConfig` / `MailConfig`. The
//! original operator scripts carried recipients, relays, and credentials
//! as process-wide constants; everything here is explicit and passed into
//! each reader/reporter at construction time.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vpnwatch_core::{DEFAULT_RELAY_PORT, DEFAULT_SSH_PORT, DeviceConfig, MailConfig};

/// Keyring service name for stored secrets.
pub const KEYRING_SERVICE: &str = "vpnwatch";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

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

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named gateway profiles.
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

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Directory holding the daily CSV records and report artifacts.
    pub log_dir: Option<PathBuf>,

    /// Session timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            log_dir: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

/// A named gateway profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Gateway hostname or IP address.
    pub host: String,

    /// SSH port.
    #[serde(default = "default_ssh_port")]
    pub port: u16,

    /// Gaia user name.
    pub username: String,

    /// Gaia password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the Gaia password.
    pub password_env: Option<String>,

    /// Default warning level for `check`-style evaluations.
    pub warning: Option<u64>,

    /// Default critical level for `check`-style evaluations.
    pub critical: Option<u64>,

    /// Override session timeout.
    pub timeout: Option<u64>,

    /// Outbound mail settings for the reporting workflows.
    pub mail: Option<MailSettings>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_ssh_port(),
            username: String::new(),
            password: None,
            password_env: None,
            warning: None,
            critical: None,
            timeout: None,
            mail: None,
        }
    }
}

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// Relay settings for one profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct MailSettings {
    /// Relay hostname.
    pub relay_host: String,

    /// Relay submission port.
    #[serde(default = "default_relay_port")]
    pub relay_port: u16,

    /// Relay account user name.
    pub username: String,

    /// Relay password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the relay password.
    pub password_env: Option<String>,

    /// RFC 5322 "From" address.
    pub from: String,

    /// Report recipients.
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            relay_host: String::new(),
            relay_port: default_relay_port(),
            username: String::new(),
            password: None,
            password_env: None,
            from: String::new(),
            recipients: Vec::new(),
        }
    }
}

fn default_relay_port() -> u16 {
    DEFAULT_RELAY_PORT
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vpnwatch", "vpnwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vpnwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("VPNWATCH_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the Gaia password from the credential chain.
pub fn resolve_device_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        profile.password_env.as_deref(),
        &format!("{profile_name}/password"),
        profile.password.as_deref(),
    )
    .ok_or_else(|| ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve the relay password from the credential chain.
pub fn resolve_relay_password(
    mail: &MailSettings,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        mail.password_env.as_deref(),
        &format!("{profile_name}/relay-password"),
        mail.password.as_deref(),
    )
    .ok_or_else(|| ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Chain: named env var → system keyring → plaintext config.
fn resolve_secret(
    env_name: Option<&str>,
    keyring_key: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    if let Some(env_name) = env_name {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, keyring_key) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    plaintext.map(|p| SecretString::from(p.to_owned()))
}

// ── Translation to core configs ─────────────────────────────────────

/// Build a `DeviceConfig` from a profile.
pub fn device_config(
    profile: &Profile,
    profile_name: &str,
    default_timeout: u64,
) -> Result<DeviceConfig, ConfigError> {
    if profile.host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("profile '{profile_name}' has no gateway host"),
        });
    }
    if profile.username.is_empty() {
        return Err(ConfigError::Validation {
            field: "username".into(),
            reason: format!("profile '{profile_name}' has no Gaia user name"),
        });
    }

    let password = resolve_device_password(profile, profile_name)?;
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout));

    Ok(DeviceConfig::new(profile.host.clone(), profile.username.clone(), password)
        .with_port(profile.port)
        .with_timeout(timeout))
}

/// Build a `MailConfig` from a profile's mail settings.
pub fn mail_config(mail: &MailSettings, profile_name: &str) -> Result<MailConfig, ConfigError> {
    if mail.relay_host.is_empty() {
        return Err(ConfigError::Validation {
            field: "mail.relay_host".into(),
            reason: format!("profile '{profile_name}' has no relay host"),
        });
    }
    if mail.recipients.is_empty() {
        return Err(ConfigError::Validation {
            field: "mail.recipients".into(),
            reason: format!("profile '{profile_name}' has no report recipients"),
        });
    }

    let password = resolve_relay_password(mail, profile_name)?;

    Ok(MailConfig {
        relay_host: mail.relay_host.clone(),
        relay_port: mail.relay_port,
        username: mail.username.clone(),
        password,
        from: mail.from.clone(),
        recipients: mail.recipients.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PROFILE_TOML: &str = r#"
default_profile = "edge"

[defaults]
log_dir = "/var/log/vpnwatch"

[profiles.edge]
host = "fw1.example.net"
username = "monitor"
password = "plaintext-password"
warning = 100
critical = 150

[profiles.edge.mail]
relay_host = "relay.example.org"
username = "reports@example.org"
password = "relay-password"
from = "reports@example.org"
recipients = ["noc@example.org", "ops@example.org"]
"#;

    fn parsed() -> Config {
        toml::from_str(PROFILE_TOML).unwrap()
    }

    #[test]
    fn parses_profiles_with_defaults_filled_in() {
        let cfg = parsed();
        let profile = &cfg.profiles["edge"];
        assert_eq!(profile.host, "fw1.example.net");
        assert_eq!(profile.port, DEFAULT_SSH_PORT);
        assert_eq!(profile.warning, Some(100));

        let mail = profile.mail.as_ref().unwrap();
        assert_eq!(mail.relay_port, DEFAULT_RELAY_PORT);
        assert_eq!(mail.recipients.len(), 2);
    }

    #[test]
    fn device_config_uses_plaintext_fallback() {
        let cfg = parsed();
        let device = device_config(&cfg.profiles["edge"], "edge", 10).unwrap();
        assert_eq!(device.host, "fw1.example.net");
        assert_eq!(device.timeout, Duration::from_secs(10));
    }

    #[test]
    fn device_config_requires_a_host() {
        let profile = Profile {
            username: "monitor".into(),
            password: Some("x".into()),
            ..Profile::default()
        };
        let err = device_config(&profile, "edge", 10).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn missing_credentials_name_the_profile() {
        let profile = Profile {
            host: "fw1".into(),
            username: "monitor".into(),
            ..Profile::default()
        };
        let err = device_config(&profile, "edge", 10).unwrap_err();
        assert!(err.to_string().contains("edge"));
    }

    #[test]
    fn mail_config_requires_recipients() {
        let mail = MailSettings {
            relay_host: "relay.example.org".into(),
            username: "reports@example.org".into(),
            password: Some("x".into()),
            from: "reports@example.org".into(),
            ..MailSettings::default()
        };
        let err = mail_config(&mail, "edge").unwrap_err();
        assert!(err.to_string().contains("recipients"));
    }

    #[test]
    fn round_trips_through_pretty_toml() {
        let cfg = parsed();
        let rendered = toml::to_string_pretty(&cfg).unwrap();
        let reparsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.profiles["edge"].host, "fw1.example.net");
    }
}
