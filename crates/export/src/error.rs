//! Error types for report export.

/// Errors that can occur while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Spreadsheet could not be built or saved.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
