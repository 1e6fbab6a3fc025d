#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod source;
pub use source::{FundamentalsSource, PriceSource, ProfileSource, ReferenceSource};

mod progress;
pub use progress::{NoProgress, ProgressSink};

mod error;
pub use error::SourceError;
