//! Error types for the NAV pull pipeline.

use cefnav_primitives::Date;
use cefnav_traits::SourceError;

/// Errors that abort a NAV pull run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reference sheet unreachable or unparsable.
    #[error("reference sheet unavailable: {0}")]
    Reference(#[source] SourceError),

    /// Bulk price request failed as a whole.
    #[error("bulk price request failed: {0}")]
    Prices(#[source] SourceError),

    /// No trading day with prices between the window start and the target.
    #[error("no price data available near {target} (searched {start} to {end}); try another date")]
    NoPriceData {
        /// Requested valuation date.
        target: Date,
        /// First date searched.
        start: Date,
        /// End of the searched window (exclusive).
        end: Date,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Returns whether retrying with a different valuation date may help.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoPriceData { .. })
    }
}
