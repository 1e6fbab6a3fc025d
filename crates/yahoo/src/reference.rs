//! Fund/NAV reference workbook.

use std::{io::Cursor, time::Duration};

use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx};
use cefnav_primitives::FundRecord;
use cefnav_traits::{ReferenceSource, SourceError};
use tracing::{debug, info};

use crate::{
    DEFAULT_REFERENCE_URL,
    client::{check_status, http_error},
};

/// Required header names, in the order they are read.
pub const REFERENCE_COLUMNS: [&str; 6] =
    ["Fund", "NAV", "Fund Type", "Subcategory", "Broad Category", "Geographic Focus"];

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty | Data::Error(_)) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Parse the first worksheet of a reference workbook.
///
/// The first row holds the headers. Rows without a fund or NAV ticker are
/// dropped; the rest keep their order.
///
/// # Errors
/// Returns `SourceError::Workbook` if the bytes are not a readable xlsx
/// workbook and `SourceError::MissingColumn` if a required header is absent.
pub fn parse_reference_sheet(bytes: &[u8]) -> Result<Vec<FundRecord>, SourceError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| SourceError::Workbook(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::Workbook("workbook has no worksheets".to_string()))?
        .map_err(|e| SourceError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> =
        rows.next().map(|row| row.iter().map(|c| cell_text(Some(c))).collect()).unwrap_or_default();
    let mut columns = [0usize; 6];
    for (slot, name) in columns.iter_mut().zip(REFERENCE_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::MissingColumn(name.to_string()))?;
    }
    let [fund_col, nav_col, type_col, subcategory_col, broad_col, region_col] = columns;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rows {
        let text = |idx: usize| cell_text(row.get(idx));
        let (fund, nav) = (text(fund_col), text(nav_col));
        if fund.is_empty() || nav.is_empty() {
            dropped += 1;
            continue;
        }
        records.push(FundRecord::new(fund, nav).with_classification(
            text(type_col),
            text(subcategory_col),
            text(broad_col),
            text(region_col),
        ));
    }

    debug!(rows = records.len(), dropped, "reference sheet parsed");
    Ok(records)
}

/// Reference sheet downloaded from a URL on every load.
#[derive(Debug, Clone)]
pub struct XlsxReferenceSource {
    url: String,
    http: reqwest::Client,
}

impl XlsxReferenceSource {
    /// Source reading the workbook at `url`.
    ///
    /// # Errors
    /// Returns `SourceError::Http` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(http_error)?;
        Ok(Self { url: url.into(), http })
    }

    /// Source reading the published ticker workbook.
    ///
    /// # Errors
    /// Returns `SourceError::Http` if the HTTP client cannot be built.
    pub fn published() -> Result<Self, SourceError> {
        Self::new(DEFAULT_REFERENCE_URL)
    }

    /// Workbook URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReferenceSource for XlsxReferenceSource {
    async fn load(&self) -> Result<Vec<FundRecord>, SourceError> {
        info!(url = %self.url, "downloading reference sheet");
        let response = self.http.get(&self.url).send().await.map_err(http_error)?;
        let bytes = check_status(response, &self.url)?.bytes().await.map_err(http_error)?;
        parse_reference_sheet(&bytes)
    }
}
