#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod candidates;
pub use candidates::{
    CandidateList, OUTSIDE_EQUITY_ITEMS, SHARES_OUTSTANDING_ITEMS, TOTAL_DEBT_ITEMS,
};

mod scale;
pub use scale::{MILLION, round_to, to_millions};

mod ratio;
pub use ratio::discount;
