#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{DEFAULT_REFERENCE_URL, YahooConfig};

mod models;

mod client;
pub use client::YahooSource;

mod prices;
pub use prices::{daily_closes, window_bounds};

mod fundamentals;
pub use fundamentals::{balance_sheet_from_timeseries, timeseries_types};

mod profile;

mod reference;
pub use reference::{REFERENCE_COLUMNS, XlsxReferenceSource, parse_reference_sheet};
