#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::PullConfig;

mod reference;
pub use reference::ReferenceCache;

mod prices;
pub use prices::{PriceSnapshot, fetch_prices, fill_gaps, normalize_batch, resolve_price_date};

mod fundamentals;
pub use fundamentals::{fetch_fundamentals, snapshot_as_of};

mod report;
pub use report::{assemble_rows, build_row};

mod pull;
pub use pull::{NavPull, Notice, RunOutcome, Sources, ticker_universe};

mod error;
pub use error::PipelineError;

/// Re-export commonly used types.
pub mod prelude {
    pub use cefnav_traits::{
        FundamentalsSource, NoProgress, PriceSource, ProfileSource, ProgressSink, ReferenceSource,
    };

    pub use super::{NavPull, PipelineError, PullConfig, RunOutcome, Sources};
}

#[cfg(test)]
mod testing;
