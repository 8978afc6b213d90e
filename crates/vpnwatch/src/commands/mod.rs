//! Subcommand handlers.

pub mod check;
pub mod config_cmd;
pub mod record;
pub mod report;
pub mod show;

use chrono::{Local, NaiveDate};

use crate::error::CliError;

/// Parse a `--date YYYYMMDD` flag, defaulting to today.
pub(crate) fn resolve_date(flag: Option<&str>) -> Result<NaiveDate, CliError> {
    match flag {
        Some(raw) => {
            NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|_| CliError::Validation {
                field: "date".into(),
                reason: format!("expected YYYYMMDD, got '{raw}'"),
            })
        }
        None => Ok(Local::now().date_naive()),
    }
}
