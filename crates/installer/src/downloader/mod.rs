//! Downloader module
//!
//! This module contains all the download functionality including
//! core types, configuration, host strategies and service helpers.

pub mod api;
pub mod core;
pub mod config;
pub mod sources;
pub mod r#lib;

// Re-export main types for convenience
pub use r#lib::ModDownloader;
pub use self::core::{
    DownloadResult, FetchOptions, HttpClient,
    ProgressCallback, ProgressEvent, ProgressReporter, IntoProgressCallback,
    ConsoleProgressReporter,
    DownloadError, Result, FileOperation,
};
pub use config::DownloadConfig;
pub use api::{GoFileAuthenticator, SessionAuthenticator, SessionToken};

// Re-export source types
pub use sources::{DownloadSource, HostKind, GitHubSource, GoFileSource, ModDbSource, UnknownSource};

#[cfg(test)]
mod tests;
