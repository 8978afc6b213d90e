//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text. The `check` subcommand never surfaces
//! these; it folds failures into its status line instead.

use miette::Diagnostic;
use thiserror::Error;

use vpnwatch_config::ConfigError;
use vpnwatch_core::CoreError;

/// Exit codes for everything except the `check` severity ordinal.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to gateway {host}")]
    #[diagnostic(
        code(vpnwatch::connection_failed),
        help(
            "Check that the gateway is reachable over SSH.\n\
             Host: {host}\n\
             Cause: {reason}"
        )
    )]
    ConnectionFailed { host: String, reason: String },

    #[error("Session timed out after {seconds}s")]
    #[diagnostic(
        code(vpnwatch::timeout),
        help("Increase --timeout or check gateway responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for gateway {host}")]
    #[diagnostic(
        code(vpnwatch::auth_failed),
        help(
            "Verify the Gaia credentials.\n\
             Run: vpnwatch config set-password"
        )
    )]
    AuthFailed { host: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(vpnwatch::no_credentials),
        help(
            "Store one with: vpnwatch config set-password --profile {profile}\n\
             Or set the profile's password_env variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Device ───────────────────────────────────────────────────────

    #[error("Remote command failed: {message}")]
    #[diagnostic(code(vpnwatch::command))]
    CommandFailed { message: String },

    #[error("Unexpected device output: {message}")]
    #[diagnostic(code(vpnwatch::parse))]
    ParseFailed { message: String },

    // ── Record / report ──────────────────────────────────────────────

    #[error("No daily record at {path}")]
    #[diagnostic(
        code(vpnwatch::record_missing),
        help("Readings append to the daily CSV. Run: vpnwatch record")
    )]
    RecordMissing { path: String },

    #[error("Daily record error: {message}")]
    #[diagnostic(code(vpnwatch::record))]
    Record { message: String },

    #[error("Report generation failed: {message}")]
    #[diagnostic(code(vpnwatch::report))]
    Report { message: String },

    #[error("Mail delivery failed: {message}")]
    #[diagnostic(
        code(vpnwatch::mail),
        help("The relay rejected the message. Report artifacts are kept on disk.")
    )]
    Mail { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid thresholds: {message}")]
    #[diagnostic(
        code(vpnwatch::thresholds),
        help("warning must be a positive integer strictly below critical")
    )]
    Thresholds { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vpnwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vpnwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vpnwatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(vpnwatch::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::RecordMissing { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Thresholds { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Thresholds { message } => CliError::Thresholds { message },

            CoreError::Device(device) => match device {
                vpnwatch_core::DeviceError::Connection { host, source } => {
                    CliError::ConnectionFailed {
                        host,
                        reason: source.to_string(),
                    }
                }
                vpnwatch_core::DeviceError::Timeout { timeout_secs, .. } => CliError::Timeout {
                    seconds: timeout_secs,
                },
                vpnwatch_core::DeviceError::Authentication { host } => {
                    CliError::AuthFailed { host }
                }
                command @ vpnwatch_core::DeviceError::Command { .. } => CliError::CommandFailed {
                    message: command.to_string(),
                },
                parse @ vpnwatch_core::DeviceError::Parse { .. } => CliError::ParseFailed {
                    message: parse.to_string(),
                },
            },

            CoreError::RecordMissing { path } => CliError::RecordMissing { path },

            CoreError::Record { path, message } => CliError::Record {
                message: format!("{path}: {message}"),
            },

            CoreError::Report { message } => CliError::Report { message },

            mail @ (CoreError::MailTransport(_)
            | CoreError::MailAddress(_)
            | CoreError::MailBuild { .. }) => CliError::Mail {
                message: mail.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Figment(inner) => CliError::Config(inner),
            ConfigError::Serialization(inner) => CliError::Validation {
                field: "config".into(),
                reason: inner.to_string(),
            },
            ConfigError::Io(inner) => CliError::Io(inner),
        }
    }
}
