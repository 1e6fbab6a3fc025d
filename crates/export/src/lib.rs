#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cefnav-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{DEFAULT_METHOD_NOTE, ExportConfig};

mod workbook;
pub use workbook::{
    SHEET_NAME, TIMESTAMP_FORMAT, file_name, provenance_note, write_workbook, write_workbook_at,
};

mod frame;
pub use frame::{report_frame, write_csv};

mod error;
pub use error::ExportError;

#[cfg(test)]
mod testing;
