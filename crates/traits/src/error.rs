//! Errors reported by data sources.

/// Errors that can occur while talking to a data provider.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(String),

    /// Non-success HTTP status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider does not know the symbol.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// Symbol exists but has no data for the request.
    #[error("no data for {0}")]
    NoData(String),

    /// Required column missing from a sheet.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Workbook could not be opened or read.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// Response had an unexpected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Returns whether this error only concerns the requested symbol.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_) | Self::NoData(_))
    }
}
