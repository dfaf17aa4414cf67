//! Manifest decoding errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before anything is installed
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest line {line_number} has {found} tab-separated fields (expected 1 for a separator, 5 or 6 for a mod)")]
    FieldCount {
        line_number: usize,
        found: usize,
        line: String,
    },

    #[error("Failed to read manifest '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid custom entries file '{path}'")]
    CustomEntries {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ManifestError>;
