//! Spreadsheet report generation.
//!
//! Renders a day's record into an XLSX workbook: the record's columns on
//! one date-named sheet, plus an embedded line chart plotting both series
//! against time of day.

use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Chart, ChartLegendPosition, ChartType, Workbook};

use crate::error::CoreError;
use crate::record::RecordRow;

/// Sheet name for a given day, e.g. `VPN Users 06-08-2026`.
pub fn sheet_name(date: NaiveDate) -> String {
    format!("VPN Users {}", date.format("%d-%m-%Y"))
}

/// Build the chart-annotated workbook for one day and save it to `path`.
pub fn write_workbook(rows: &[RecordRow], date: NaiveDate, path: &Path) -> Result<(), CoreError> {
    if rows.is_empty() {
        return Err(CoreError::Report {
            message: format!("no rows recorded for {}", date.format("%Y%m%d")),
        });
    }

    let name = sheet_name(date);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&name)?;

    worksheet.write_string(0, 0, "Time")?;
    worksheet.write_string(0, 1, "VpnUsers")?;
    worksheet.write_string(0, 2, "PeakUsers")?;

    let mut row_idx: u32 = 0;
    for row in rows {
        row_idx += 1;
        worksheet.write_string(row_idx, 0, &row.time)?;
        worksheet.write_number(row_idx, 1, row.vpn_users as f64)?;
        worksheet.write_number(row_idx, 2, row.peak_users as f64)?;
    }

    let mut chart = Chart::new(ChartType::Line);
    for col in 1..=2u16 {
        chart
            .add_series()
            .set_name((name.as_str(), 0, col))
            .set_categories((name.as_str(), 1, 0, row_idx, 0))
            .set_values((name.as_str(), 1, col, row_idx, col));
    }
    chart.legend().set_position(ChartLegendPosition::Top);
    chart.x_axis().set_name("Time of Day");
    chart.y_axis().set_name("Value").set_major_gridlines(false);

    // Next to the data, clear of the columns.
    worksheet.insert_chart(1, 4, &chart)?;

    workbook.save(path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "workbook written");
    Ok(())
}
