//! # cefnav
//!
//! Closed-end fund price, NAV and discount pulls.
//!
//! This crate provides a unified interface to the cefnav crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Data source abstractions
//! - `utils`: Line-item resolution and unit scaling
//! - `pipeline`: Price, fundamentals and report assembly
//! - `yahoo`: Yahoo Finance and reference workbook sources
//! - `export`: Spreadsheet and CSV output
//! - `cli`: The `nav-pull` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use cefnav::{
//!     pipeline::{NavPull, Sources},
//!     traits::NoProgress,
//!     yahoo::{XlsxReferenceSource, YahooSource},
//! };
//!
//! let yahoo = Arc::new(YahooSource::new()?);
//! let pull = NavPull::new(Sources {
//!     reference: Arc::new(XlsxReferenceSource::published()?),
//!     prices: yahoo.clone(),
//!     fundamentals: yahoo.clone(),
//!     profiles: yahoo,
//! });
//! let outcome = pull.run(date, &NoProgress).await?;
//! cefnav::export::write_workbook(&outcome.rows, outcome.price_date, &Default::default())?;
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use cefnav_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use cefnav_traits as traits;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use cefnav_utils as utils;
#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use cefnav_pipeline as pipeline;
#[cfg(feature = "yahoo")]
#[doc(inline)]
pub use cefnav_yahoo as yahoo;
#[cfg(feature = "export")]
#[doc(inline)]
pub use cefnav_export as export;
