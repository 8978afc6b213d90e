// ── Core error types ──
//
// User-facing errors from vpnwatch-core. Consumers never see raw csv/xlsx
// library errors directly; the From impls translate them into the closed
// taxonomy the CLI maps to exit codes and severities.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad warning/critical pair. Reported before any evaluation or
    /// network I/O is attempted.
    #[error("invalid thresholds: {message}")]
    Thresholds { message: String },

    /// A collection failure from the device layer.
    #[error(transparent)]
    Device(#[from] vpnwatch_device::Error),

    /// The expected daily record does not exist yet.
    #[error("no daily record at {path}")]
    RecordMissing { path: String },

    /// Reading or writing the daily record failed.
    #[error("daily record {path}: {message}")]
    Record { path: String, message: String },

    /// Workbook generation failed.
    #[error("report generation failed: {message}")]
    Report { message: String },

    /// The relay refused the connection or the message.
    #[error("mail transport error: {0}")]
    MailTransport(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed.
    #[error("mail address error: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("mail build error: {message}")]
    MailBuild { message: String },
}

impl CoreError {
    /// True when the failure happened at the mail boundary. Callers log
    /// these and keep the already-produced artifacts.
    pub fn is_transmission(&self) -> bool {
        matches!(
            self,
            Self::MailTransport(_) | Self::MailAddress(_) | Self::MailBuild { .. }
        )
    }
}

impl From<rust_xlsxwriter::XlsxError> for CoreError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Report {
            message: err.to_string(),
        }
    }
}

impl From<lettre::error::Error> for CoreError {
    fn from(err: lettre::error::Error) -> Self {
        Self::MailBuild {
            message: err.to_string(),
        }
    }
}
