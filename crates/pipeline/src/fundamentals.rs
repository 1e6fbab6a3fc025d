//! As-of balance-sheet snapshots.

use std::collections::BTreeMap;

use cefnav_primitives::{BalanceSheet, Date, FundamentalsSnapshot, ReportingPeriod, Symbol};
use cefnav_traits::FundamentalsSource;
use cefnav_utils::{OUTSIDE_EQUITY_ITEMS, SHARES_OUTSTANDING_ITEMS, TOTAL_DEBT_ITEMS};
use tracing::{debug, info, warn};

/// Snapshot from the most recent report dated on or before `as_of`.
#[must_use]
pub fn snapshot_as_of(sheet: &BalanceSheet, as_of: Date) -> FundamentalsSnapshot {
    sheet.as_of(as_of).map_or_else(FundamentalsSnapshot::empty, |(report_date, items)| {
        FundamentalsSnapshot {
            shares_outstanding: SHARES_OUTSTANDING_ITEMS.resolve(items),
            total_debt: TOTAL_DEBT_ITEMS.resolve(items),
            outside_equity: OUTSIDE_EQUITY_ITEMS.resolve(items),
            report_date: Some(report_date),
        }
    })
}

/// As-of snapshots for every symbol.
///
/// A symbol whose balance sheet cannot be fetched gets an empty snapshot;
/// the others are unaffected.
pub async fn fetch_fundamentals(
    source: &dyn FundamentalsSource,
    symbols: &[Symbol],
    as_of: Date,
    period: ReportingPeriod,
) -> BTreeMap<Symbol, FundamentalsSnapshot> {
    info!(symbols = symbols.len(), %period, %as_of, "downloading fundamentals");

    let mut snapshots = BTreeMap::new();
    for symbol in symbols {
        let snapshot = match source.balance_sheet(symbol, period).await {
            Ok(sheet) => snapshot_as_of(&sheet, as_of),
            Err(e) => {
                warn!(%symbol, error = %e, "balance sheet unavailable");
                FundamentalsSnapshot::empty()
            }
        };
        debug!(%symbol, report_date = ?snapshot.report_date, "fundamentals resolved");
        snapshots.insert(symbol.clone(), snapshot);
    }
    snapshots
}
