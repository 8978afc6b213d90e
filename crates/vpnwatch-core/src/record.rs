//! The per-day durable CSV record of readings.
//!
//! One file per calendar day, `vpnusers_YYYYMMDD.csv`, header
//! `Time,VpnUsers,PeakUsers`, one row appended per collection. The file
//! is created with its header on first append; invocations are not
//! expected to run concurrently on the same day's log, so no locking.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Reading;
use crate::error::CoreError;

/// One row of the daily record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    /// Time of day, `HH:MM`.
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "VpnUsers")]
    pub vpn_users: u64,
    #[serde(rename = "PeakUsers")]
    pub peak_users: u64,
}

impl RecordRow {
    fn from_reading(reading: &Reading) -> Self {
        Self {
            time: reading.timestamp.format("%H:%M").to_string(),
            vpn_users: reading.current_users,
            peak_users: reading.peak_users,
        }
    }
}

/// The daily record store rooted at a base directory.
#[derive(Debug, Clone)]
pub struct DailyRecord {
    dir: PathBuf,
}

impl DailyRecord {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `vpnusers_YYYYMMDD.csv` for the given day.
    pub fn csv_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("vpnusers_{}.csv", date.format("%Y%m%d")))
    }

    /// `vpnusers_YYYYMMDD.xlsx` for the given day.
    pub fn xlsx_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("vpnusers_{}.xlsx", date.format("%Y%m%d")))
    }

    /// Append a reading to its day's file, creating the file with a
    /// header row when absent. Returns the path written to.
    pub fn append(&self, reading: &Reading) -> Result<PathBuf, CoreError> {
        let path = self.csv_path(reading.timestamp.date_naive());
        let new_file = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| record_error(&path, &e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(new_file)
            .from_writer(file);
        writer
            .serialize(RecordRow::from_reading(reading))
            .map_err(|e| record_error(&path, &e))?;
        writer.flush().map_err(|e| record_error(&path, &e))?;

        tracing::debug!(path = %path.display(), "reading appended to daily record");
        Ok(path)
    }

    /// Load every row recorded for the given day, in append order.
    pub fn load(&self, date: NaiveDate) -> Result<Vec<RecordRow>, CoreError> {
        let path = self.csv_path(date);
        if !path.exists() {
            return Err(CoreError::RecordMissing {
                path: path.display().to_string(),
            });
        }
        let mut reader = csv::Reader::from_path(&path).map_err(|e| record_error(&path, &e))?;
        reader
            .deserialize()
            .collect::<Result<Vec<RecordRow>, _>>()
            .map_err(|e| record_error(&path, &e))
    }
}

fn record_error(path: &Path, err: &dyn std::fmt::Display) -> CoreError {
    CoreError::Record {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    fn reading_at(hour: u32, min: u32, current: u64, peak: u64) -> Reading {
        Reading {
            current_users: current,
            peak_users: peak,
            timestamp: Local.with_ymd_and_hms(2026, 8, 6, hour, min, 0).unwrap(),
        }
    }

    #[test]
    fn first_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let record = DailyRecord::new(dir.path());

        let path = record.append(&reading_at(9, 30, 12, 40)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Time,VpnUsers,PeakUsers\n09:30,12,40\n");
    }

    #[test]
    fn later_appends_do_not_repeat_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let record = DailyRecord::new(dir.path());

        record.append(&reading_at(9, 30, 12, 40)).unwrap();
        record.append(&reading_at(10, 0, 15, 40)).unwrap();

        let date = reading_at(9, 30, 12, 40).timestamp.date_naive();
        let contents = std::fs::read_to_string(record.csv_path(date)).unwrap();
        assert_eq!(
            contents,
            "Time,VpnUsers,PeakUsers\n09:30,12,40\n10:00,15,40\n"
        );
    }

    #[test]
    fn load_round_trips_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let record = DailyRecord::new(dir.path());

        record.append(&reading_at(9, 30, 12, 40)).unwrap();
        record.append(&reading_at(10, 0, 15, 41)).unwrap();

        let date = reading_at(9, 30, 12, 40).timestamp.date_naive();
        let rows = record.load(date).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "09:30");
        assert_eq!(rows[0].vpn_users, 12);
        assert_eq!(rows[1].peak_users, 41);
    }

    #[test]
    fn loading_a_missing_day_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let record = DailyRecord::new(dir.path());

        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let err = record.load(date).unwrap_err();
        assert!(matches!(err, CoreError::RecordMissing { .. }));
        assert!(err.to_string().contains("vpnusers_20260101.csv"));
    }

    #[test]
    fn file_names_embed_the_date() {
        let record = DailyRecord::new("/var/log/vpnwatch");
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert!(record.csv_path(date).ends_with("vpnusers_20260806.csv"));
        assert!(record.xlsx_path(date).ends_with("vpnusers_20260806.xlsx"));
    }
}
