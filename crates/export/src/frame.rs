//! Results table as a polars `DataFrame`.

use std::{fs::File, path::PathBuf};

use cefnav_primitives::{DATE_FORMAT, Date, REPORT_COLUMNS, ReportRow};
use polars::prelude::*;
use tracing::info;

use crate::{ExportConfig, ExportError};

fn text(name: &str, rows: &[ReportRow], get: impl Fn(&ReportRow) -> &str) -> Column {
    Column::new(name.into(), rows.iter().map(get).collect::<Vec<_>>())
}

fn number(name: &str, rows: &[ReportRow], get: impl Fn(&ReportRow) -> Option<f64>) -> Column {
    Column::new(name.into(), rows.iter().map(get).collect::<Vec<_>>())
}

/// Report rows as a frame with [`REPORT_COLUMNS`] headers.
///
/// Absent values are nulls. Dates are `YYYY-MM-DD` strings, as in the
/// workbook.
///
/// # Errors
/// Returns `PolarsError` if the frame cannot be assembled.
pub fn report_frame(rows: &[ReportRow]) -> PolarsResult<DataFrame> {
    let [
        fund_name,
        broad_category,
        fund_type,
        subcategory,
        region,
        date,
        fund_ticker,
        fund_price,
        nav_ticker,
        nav_price,
        discount,
        shares,
        debt,
        outside_equity,
    ] = REPORT_COLUMNS;

    let dates: Vec<String> = rows.iter().map(|r| r.date.format(DATE_FORMAT).to_string()).collect();

    DataFrame::new(vec![
        text(fund_name, rows, |r| r.fund_name.as_str()),
        text(broad_category, rows, |r| r.broad_category.as_str()),
        text(fund_type, rows, |r| r.fund_type.as_str()),
        text(subcategory, rows, |r| r.subcategory.as_str()),
        text(region, rows, |r| r.region.as_str()),
        Column::new(date.into(), dates),
        text(fund_ticker, rows, |r| r.fund_ticker.as_str()),
        number(fund_price, rows, |r| r.fund_price),
        text(nav_ticker, rows, |r| r.nav_ticker.as_str()),
        number(nav_price, rows, |r| r.nav_price),
        number(discount, rows, |r| r.discount),
        number(shares, rows, |r| r.shares_outstanding_m),
        number(debt, rows, |r| r.total_debt_m),
        number(outside_equity, rows, |r| r.outside_equity_m),
    ])
}

/// Write the results table as `Closed_End_Fund_Data_<date>.csv`.
///
/// # Errors
/// Returns `ExportError` if the frame cannot be built or the file cannot be
/// written.
pub fn write_csv(
    rows: &[ReportRow],
    price_date: Date,
    config: &ExportConfig,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config
        .output_dir
        .join(format!("Closed_End_Fund_Data_{}.csv", price_date.format(DATE_FORMAT)));

    let mut df = report_frame(rows)?;
    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;

    info!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(path)
}
