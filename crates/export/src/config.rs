//! Export configuration.

use std::path::PathBuf;

/// Method description written into the provenance note.
pub const DEFAULT_METHOD_NOTE: &str =
    "This file was created using Rust, rust_xlsxwriter, and batched Yahoo Finance requests.";

/// Where and how reports are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory receiving the output files; created if missing.
    pub output_dir: PathBuf,
    /// Text after `Method:` in the provenance note.
    pub method_note: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("."), method_note: DEFAULT_METHOD_NOTE.to_string() }
    }
}

impl ExportConfig {
    /// Default configuration writing into `output_dir`.
    #[must_use]
    pub fn in_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), ..Self::default() }
    }
}
