//! Core domain logic for vpnwatch.
//!
//! Holds the reading model, threshold evaluation, monitoring status-line
//! formatting, and the three sinks a reading can flow into: the per-day
//! CSV record, the chart-annotated spreadsheet report, and outbound mail.
//! Transport lives in `vpnwatch-device`; CLI concerns live above this
//! crate.

mod error;
mod model;
mod record;
mod report;
mod severity;
mod status;

pub mod mail;

pub use error::CoreError;
pub use mail::{DEFAULT_RELAY_PORT, MailConfig, Mailer};
pub use model::Reading;
pub use record::{DailyRecord, RecordRow};
pub use report::{sheet_name, write_workbook};
pub use severity::{Severity, Thresholds};
pub use status::{CheckOutcome, StatusLine};

// Device types re-exported so consumers need only one dependency.
pub use vpnwatch_device::{
    DEFAULT_SSH_PORT, DeviceConfig, Error as DeviceError, GaiaSession, TableCounts,
    VPN_USERS_COMMAND,
};
