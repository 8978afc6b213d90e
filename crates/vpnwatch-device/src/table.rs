//! Parser for `fw tab -t userc_users -s` output.
//!
//! The summary form prints one header row and one data row per table:
//!
//! ```text
//! HOST                  NAME                          ID #VALS #PEAK #SLINKS
//! localhost             userc_users                 8158    42    77       0
//! ```
//!
//! The 4th field (`#VALS`) is the current entry count and the 5th
//! (`#PEAK`) the device-reported high-water mark.

use crate::error::Error;

/// Raw counts parsed from the kernel table summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    /// Current number of table entries (`#VALS`).
    pub vals: u64,
    /// Device-reported high-water mark (`#PEAK`).
    pub peak: u64,
}

const VALS_FIELD: usize = 3;
const PEAK_FIELD: usize = 4;
const MIN_FIELDS: usize = 5;

/// Parse the summary output into counts.
///
/// Blank lines and the header row (the one containing `NAME`) are
/// skipped. Zero data rows is an error. More than one data row is
/// unexpected for this table; the last row wins, loudly.
pub(crate) fn parse_summary(host: &str, output: &str) -> Result<TableCounts, Error> {
    let mut counts = None;
    let mut rows = 0usize;

    for line in output.lines() {
        if line.trim().is_empty() || line.contains("NAME") {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return Err(parse_error(
                host,
                format!(
                    "expected at least {MIN_FIELDS} columns, got {} in '{}'",
                    fields.len(),
                    line.trim()
                ),
            ));
        }
        let vals = parse_count(host, fields[VALS_FIELD], "#VALS")?;
        let peak = parse_count(host, fields[PEAK_FIELD], "#PEAK")?;
        rows += 1;
        counts = Some(TableCounts { vals, peak });
    }

    if rows > 1 {
        tracing::warn!(host, rows, "table summary returned multiple data rows; keeping the last");
    }
    counts.ok_or_else(|| parse_error(host, "no data rows in table summary".to_owned()))
}

fn parse_count(host: &str, field: &str, column: &str) -> Result<u64, Error> {
    field
        .parse()
        .map_err(|_| parse_error(host, format!("{column} column '{field}' is not a count")))
}

fn parse_error(host: &str, reason: String) -> Error {
    Error::Parse {
        host: host.to_owned(),
        reason,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SUMMARY: &str = "\
HOST                  NAME                          ID #VALS #PEAK #SLINKS
localhost             userc_users                 8158    42    77       0
";

    #[test]
    fn parses_current_and_peak_fields() {
        let counts = parse_summary("fw1", SUMMARY).unwrap();
        assert_eq!(counts, TableCounts { vals: 42, peak: 77 });
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let output = format!("\n{SUMMARY}\n");
        let counts = parse_summary("fw1", &output).unwrap();
        assert_eq!(counts.vals, 42);
    }

    #[test]
    fn zero_users_is_a_valid_reading() {
        let output = "\
HOST                  NAME                          ID #VALS #PEAK #SLINKS
localhost             userc_users                 8158     0     0       0
";
        let counts = parse_summary("fw1", output).unwrap();
        assert_eq!(counts, TableCounts { vals: 0, peak: 0 });
    }

    #[test]
    fn no_data_rows_is_an_error() {
        let output = "HOST                  NAME                          ID #VALS #PEAK #SLINKS\n";
        let err = parse_summary("fw1", output).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("fw1"));
    }

    #[test]
    fn multiple_rows_last_wins() {
        let output = "\
HOST                  NAME                          ID #VALS #PEAK #SLINKS
localhost             userc_users                 8158    42    77       0
localhost             userc_users                 8159     7    11       0
";
        let counts = parse_summary("fw1", output).unwrap();
        assert_eq!(counts, TableCounts { vals: 7, peak: 11 });
    }

    #[test]
    fn short_row_is_an_error() {
        let output = "\
HOST                  NAME                          ID #VALS #PEAK #SLINKS
localhost             userc_users                 8158
";
        let err = parse_summary("fw1", output).unwrap_err();
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn non_numeric_count_is_an_error() {
        let output = "\
HOST                  NAME                          ID #VALS #PEAK #SLINKS
localhost             userc_users                 8158   abc    77       0
";
        let err = parse_summary("fw1", output).unwrap_err();
        assert!(err.to_string().contains("#VALS"));
    }
}
