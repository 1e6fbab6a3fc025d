//! Data source trait definitions.

use async_trait::async_trait;
use cefnav_primitives::{
    BalanceSheet, DailyClose, DateWindow, FundRecord, PriceBatch, ReportingPeriod, Symbol,
};

use crate::SourceError;

/// Source of the fund/NAV reference sheet.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Load every reference row that carries both a fund and a NAV ticker,
    /// in sheet order.
    ///
    /// # Errors
    /// Returns `SourceError` if the sheet cannot be fetched or parsed.
    async fn load(&self) -> Result<Vec<FundRecord>, SourceError>;
}

/// Source of daily closing prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch daily closes for all `symbols` over `window` as one request.
    ///
    /// Failures scoped to a single symbol must not fail the batch; the
    /// symbol is left out of the result instead.
    ///
    /// # Errors
    /// Returns `SourceError` only when the request as a whole fails.
    async fn fetch_batch(
        &self,
        symbols: &[Symbol],
        window: &DateWindow,
    ) -> Result<PriceBatch, SourceError>;

    /// Fetch daily closes for one symbol over `window`.
    ///
    /// # Errors
    /// Returns `SourceError` if the symbol's history cannot be retrieved.
    async fn fetch_symbol(
        &self,
        symbol: &Symbol,
        window: &DateWindow,
    ) -> Result<Vec<DailyClose>, SourceError>;
}

/// Source of balance-sheet history.
#[async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Balance-sheet history of `symbol` at the given granularity.
    ///
    /// # Errors
    /// Returns `SourceError` if the history cannot be retrieved.
    async fn balance_sheet(
        &self,
        symbol: &Symbol,
        period: ReportingPeriod,
    ) -> Result<BalanceSheet, SourceError>;
}

/// Source of instrument metadata.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Display name of `symbol`, if the provider has one.
    ///
    /// # Errors
    /// Returns `SourceError` if the lookup fails.
    async fn display_name(&self, symbol: &Symbol) -> Result<Option<String>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedNames;

    #[async_trait]
    impl ProfileSource for FixedNames {
        async fn display_name(&self, symbol: &Symbol) -> Result<Option<String>, SourceError> {
            match symbol.as_str() {
                "PDI" => Ok(Some("PIMCO Dynamic Income Fund".to_string())),
                "ZZZZ" => Err(SourceError::SymbolNotFound(symbol.to_string())),
                _ => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn profile_source_is_object_safe() {
        let source: Box<dyn ProfileSource> = Box::new(FixedNames);
        assert_eq!(
            source.display_name(&Symbol::new("PDI")).await.unwrap().as_deref(),
            Some("PIMCO Dynamic Income Fund")
        );
        assert_eq!(source.display_name(&Symbol::new("ADX")).await.unwrap(), None);
        assert!(source.display_name(&Symbol::new("ZZZZ")).await.is_err());
    }
}
