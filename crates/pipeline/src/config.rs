//! Run configuration.

use std::time::Duration;

use cefnav_primitives::{DEFAULT_LOOKBACK_DAYS, ReportingPeriod};

use crate::PipelineError;

/// Configuration for a NAV pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullConfig {
    /// Balance-sheet granularity used for fundamentals.
    pub reporting_period: ReportingPeriod,
    /// Days on either side of the valuation date searched for prices.
    pub lookback_days: u64,
    /// How long a loaded reference sheet stays valid (None = for the whole
    /// session).
    pub reference_ttl: Option<Duration>,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            reporting_period: ReportingPeriod::Quarterly,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            reference_ttl: Some(Duration::from_secs(60 * 60)),
        }
    }
}

impl PullConfig {
    /// Check the configuration.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` if the lookback is zero.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.lookback_days == 0 {
            return Err(PipelineError::InvalidConfig(
                "lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
