//! NAV pull orchestration.

use std::{collections::HashSet, fmt, sync::Arc};

use cefnav_primitives::{Date, DateWindow, FundRecord, ReportRow, Symbol};
use cefnav_traits::{
    FundamentalsSource, PriceSource, ProfileSource, ProgressSink, ReferenceSource,
};
use tracing::{info, warn};

use crate::{
    PipelineError, PullConfig, ReferenceCache, assemble_rows, fetch_fundamentals, fetch_prices,
};

/// External collaborators of a NAV pull.
#[derive(Clone)]
pub struct Sources {
    /// Reference sheet.
    pub reference: Arc<dyn ReferenceSource>,
    /// Daily closes.
    pub prices: Arc<dyn PriceSource>,
    /// Balance sheets.
    pub fundamentals: Arc<dyn FundamentalsSource>,
    /// Display names.
    pub profiles: Arc<dyn ProfileSource>,
}

impl fmt::Debug for Sources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}

/// Something the user should know about a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The requested date had no prices; an earlier trading day was used.
    FallbackDate {
        /// Date the user asked for.
        requested: Date,
        /// Date the prices were taken from.
        used: Date,
    },
    /// A ticker still had no close after its retry.
    MissingPrice {
        /// Ticker without a close.
        symbol: Symbol,
        /// Trading date.
        date: Date,
    },
    /// A fund had no balance-sheet report on or before the valuation date.
    MissingFundamentals {
        /// Fund ticker.
        symbol: Symbol,
    },
    /// The reference sheet had no usable rows.
    EmptyReference,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FallbackDate { requested, used } => {
                write!(f, "No data for {requested}. Using fallback date: {used}")
            }
            Self::MissingPrice { symbol, date } => {
                write!(f, "No close price for {symbol} on {date}")
            }
            Self::MissingFundamentals { symbol } => {
                write!(f, "No balance-sheet report for {symbol}")
            }
            Self::EmptyReference => f.write_str("Reference sheet has no rows with both tickers"),
        }
    }
}

/// Result of one NAV pull.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Date the user asked for.
    pub valuation_date: Date,
    /// Trading date the prices were taken from.
    pub price_date: Date,
    /// One row per reference fund, in reference order.
    pub rows: Vec<ReportRow>,
    /// Non-fatal notices.
    pub notices: Vec<Notice>,
}

impl RunOutcome {
    /// Whether the price date differs from the valuation date.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.price_date != self.valuation_date
    }
}

/// Deduplicated union of fund and NAV tickers, funds first, in reference
/// order.
#[must_use]
pub fn ticker_universe(records: &[FundRecord]) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| &r.fund)
        .chain(records.iter().map(|r| &r.nav))
        .filter(|s| seen.insert(*s))
        .cloned()
        .collect()
}

fn fund_symbols(records: &[FundRecord]) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    records.iter().map(|r| &r.fund).filter(|s| seen.insert(*s)).cloned().collect()
}

/// Runs NAV pulls against a fixed set of sources.
///
/// The reference sheet is cached across runs according to
/// [`PullConfig::reference_ttl`].
pub struct NavPull {
    reference: ReferenceCache,
    sources: Sources,
    config: PullConfig,
}

impl fmt::Debug for NavPull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavPull")
            .field("reference", &self.reference)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NavPull {
    /// Create a pull with the default configuration.
    #[must_use]
    pub fn new(sources: Sources) -> Self {
        let config = PullConfig::default();
        let reference = ReferenceCache::new(Arc::clone(&sources.reference), config.reference_ttl);
        Self { reference, sources, config }
    }

    /// Create a pull with a custom configuration.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(sources: Sources, config: PullConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let reference = ReferenceCache::new(Arc::clone(&sources.reference), config.reference_ttl);
        Ok(Self { reference, sources, config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PullConfig {
        &self.config
    }

    /// Reference-sheet cache shared by every run of this pull.
    #[must_use]
    pub const fn reference(&self) -> &ReferenceCache {
        &self.reference
    }

    /// Pull prices and fundamentals for `valuation_date` and assemble the
    /// report rows.
    ///
    /// # Errors
    /// Returns `PipelineError` if the reference sheet cannot be loaded, the
    /// bulk price request fails, or no trading day with prices exists in
    /// the lookup window.
    pub async fn run(
        &self,
        valuation_date: Date,
        progress: &dyn ProgressSink,
    ) -> Result<RunOutcome, PipelineError> {
        let records = self.reference.get().await.map_err(PipelineError::Reference)?;
        if records.is_empty() {
            warn!("reference sheet has no usable rows");
            progress.finish();
            return Ok(RunOutcome {
                valuation_date,
                price_date: valuation_date,
                rows: Vec::new(),
                notices: vec![Notice::EmptyReference],
            });
        }

        let window = DateWindow::with_radius(valuation_date, self.config.lookback_days);
        let universe = ticker_universe(&records);
        let prices = fetch_prices(self.sources.prices.as_ref(), &universe, &window).await?;

        let funds = fund_symbols(&records);
        let fundamentals = fetch_fundamentals(
            self.sources.fundamentals.as_ref(),
            &funds,
            valuation_date,
            self.config.reporting_period,
        )
        .await;

        let rows = assemble_rows(
            &records,
            &prices,
            &fundamentals,
            self.sources.profiles.as_ref(),
            progress,
        )
        .await;

        let mut notices = Vec::new();
        if let Some(requested) = prices.fallback_from {
            notices.push(Notice::FallbackDate { requested, used: prices.date });
        }
        notices.extend(
            prices
                .unresolved
                .iter()
                .map(|symbol| Notice::MissingPrice { symbol: symbol.clone(), date: prices.date }),
        );
        notices.extend(
            funds
                .iter()
                .filter(|s| fundamentals.get(*s).is_none_or(|snap| snap.is_empty()))
                .map(|symbol| Notice::MissingFundamentals { symbol: symbol.clone() }),
        );

        info!(rows = rows.len(), price_date = %prices.date, "NAV pull complete");
        Ok(RunOutcome { valuation_date, price_date: prices.date, rows, notices })
    }
}
