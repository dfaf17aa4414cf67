//! Core types used throughout the downloader system
//!
//! This module contains the fundamental types that all other modules depend on.

pub mod error;
pub mod files;
pub mod http;
pub mod progress;

// Re-export main types for convenience
pub use error::{DownloadError, FileOperation, Result};
pub use files::{extension_for_content_type, UNKNOWN_EXTENSION};
pub use http::{FetchOptions, HttpClient};
pub use progress::{
    ConsoleProgressReporter, IntoProgressCallback, ProgressCallback,
    ProgressEvent, ProgressReporter,
};

use std::path::PathBuf;

/// Result of a download operation
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadResult {
    /// Archive written to `path`
    Downloaded { path: PathBuf, size: u64 },
    /// Nothing to download; not a failure
    Skipped { reason: String },
}

impl DownloadResult {
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            DownloadResult::Downloaded { path, .. } => Some(path),
            DownloadResult::Skipped { .. } => None,
        }
    }
}
