//! xlsx report writer.

use std::{
    fs,
    path::{Path, PathBuf},
};

use cefnav_primitives::{DATE_FORMAT, Date, REPORT_COLUMNS, ReportCell, ReportRow};
use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::{ExportConfig, ExportError};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Sheet1";

/// Timestamp layout of the provenance note.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output file name for a report priced on `date`.
#[must_use]
pub fn file_name(date: Date) -> String {
    format!("Closed_End_Fund_Data_{}.xlsx", date.format(DATE_FORMAT))
}

/// Provenance line written below the data.
#[must_use]
pub fn provenance_note(downloaded_at: NaiveDateTime, method: &str) -> String {
    format!("Downloaded on {}. Method: {method}", downloaded_at.format(TIMESTAMP_FORMAT))
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: ReportCell<'_>,
) -> Result<(), XlsxError> {
    match cell {
        ReportCell::Text("") | ReportCell::Number(None) => {}
        ReportCell::Text(text) => {
            sheet.write_string(row, col, text)?;
        }
        ReportCell::Date(date) => {
            sheet.write_string(row, col, date.format(DATE_FORMAT).to_string())?;
        }
        ReportCell::Number(Some(value)) => {
            sheet.write_number(row, col, value)?;
        }
    }
    Ok(())
}

fn build(rows: &[ReportRow], note: String, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in (0u16..).zip(REPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, name, &bold)?;
    }
    for (r, row) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(row.cells()) {
            write_cell(sheet, r, col, cell)?;
        }
    }

    // Header is row 0 and the last data row is rows.len(); leave one blank row.
    let note_row = u32::try_from(rows.len() + 2).unwrap_or(u32::MAX);
    sheet.write_string(note_row, 0, note)?;

    workbook.save(path)
}

/// Write the report with an explicit download timestamp.
///
/// The file is fully saved and closed when this returns.
///
/// # Errors
/// Returns `ExportError` if the output directory cannot be created or the
/// workbook cannot be written.
pub fn write_workbook_at(
    rows: &[ReportRow],
    price_date: Date,
    config: &ExportConfig,
    downloaded_at: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(&config.output_dir)?;
    let path = config.output_dir.join(file_name(price_date));

    build(rows, provenance_note(downloaded_at, &config.method_note), &path)?;

    info!(path = %path.display(), rows = rows.len(), "report written");
    Ok(path)
}

/// Write the report, stamped with the current local time.
///
/// # Errors
/// Returns `ExportError` if the output directory cannot be created or the
/// workbook cannot be written.
pub fn write_workbook(
    rows: &[ReportRow],
    price_date: Date,
    config: &ExportConfig,
) -> Result<PathBuf, ExportError> {
    write_workbook_at(rows, price_date, config, Local::now().naive_local())
}
