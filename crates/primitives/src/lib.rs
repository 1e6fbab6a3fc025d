#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asset;
pub use asset::{FundRecord, Symbol};

mod window;
pub use window::{DATE_FORMAT, DEFAULT_LOOKBACK_DAYS, DateWindow};

mod prices;
pub use prices::{DailyClose, PriceBatch, PriceTable};

mod fundamentals;
pub use fundamentals::{BalanceSheet, FundamentalsSnapshot, LineItems, ReportingPeriod};

mod report;
pub use report::{REPORT_COLUMNS, ReportCell, ReportRow};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
