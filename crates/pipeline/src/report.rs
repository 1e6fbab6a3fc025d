//! Report row assembly.

use std::collections::BTreeMap;

use cefnav_primitives::{FundRecord, FundamentalsSnapshot, ReportRow, Symbol};
use cefnav_traits::{ProfileSource, ProgressSink};
use cefnav_utils::{discount, to_millions};
use tracing::{debug, warn};

use crate::PriceSnapshot;

/// Join one reference row with its prices and fundamentals.
#[must_use]
pub fn build_row(
    record: &FundRecord,
    fund_name: String,
    prices: &PriceSnapshot,
    fundamentals: &FundamentalsSnapshot,
) -> ReportRow {
    let fund_price = prices.close(&record.fund);
    let nav_price = prices.close(&record.nav);

    ReportRow {
        fund_name,
        broad_category: record.broad_category.clone(),
        fund_type: record.fund_type.clone(),
        subcategory: record.subcategory.clone(),
        region: record.region.clone(),
        date: prices.date,
        fund_ticker: record.fund.clone(),
        fund_price,
        nav_ticker: record.nav.clone(),
        nav_price,
        discount: discount(fund_price, nav_price),
        shares_outstanding_m: to_millions(fundamentals.shares_outstanding),
        total_debt_m: to_millions(fundamentals.total_debt),
        outside_equity_m: to_millions(fundamentals.outside_equity),
    }
}

async fn display_name(profiles: &dyn ProfileSource, symbol: &Symbol) -> String {
    match profiles.display_name(symbol).await {
        Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => {
            debug!(%symbol, "no display name, using ticker");
            symbol.to_string()
        }
        Err(e) => {
            warn!(%symbol, error = %e, "display name lookup failed, using ticker");
            symbol.to_string()
        }
    }
}

/// Build one row per record, in record order, reporting progress after
/// each row.
pub async fn assemble_rows(
    records: &[FundRecord],
    prices: &PriceSnapshot,
    fundamentals: &BTreeMap<Symbol, FundamentalsSnapshot>,
    profiles: &dyn ProfileSource,
    progress: &dyn ProgressSink,
) -> Vec<ReportRow> {
    let total = records.len();
    let empty = FundamentalsSnapshot::empty();
    let mut rows = Vec::with_capacity(total);

    for (idx, record) in records.iter().enumerate() {
        let name = display_name(profiles, &record.fund).await;
        let snapshot = fundamentals.get(&record.fund).unwrap_or(&empty);
        rows.push(build_row(record, name, prices, snapshot));
        progress.advance(idx + 1, total, &record.fund);
    }
    progress.finish();

    rows
}
