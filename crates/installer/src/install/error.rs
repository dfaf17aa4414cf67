//! Installation error types

use std::path::PathBuf;
use thiserror::Error;

use crate::downloader::DownloadError;

/// Errors that can occur while installing an entry
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("Extraction of {archive} failed: {reason}")]
    Extraction { archive: PathBuf, reason: String },

    #[error("Copy from {from} to {to} failed: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallError {
    /// Install step the error came from, used in the failure log
    pub fn stage(&self) -> &'static str {
        match self {
            InstallError::Download(_) => "download",
            InstallError::Extraction { .. } => "extract",
            InstallError::Copy { .. } => "copy",
            InstallError::CreateDir { .. } => "create_dir",
            InstallError::Io(_) => "io",
        }
    }

    /// Finer-grained category for log fields
    pub fn category(&self) -> &'static str {
        match self {
            InstallError::Download(e) => e.category(),
            other => other.stage(),
        }
    }

    /// Hint for fixing the entry before a retry
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            InstallError::Download(e) => e.suggestion(),
            InstallError::Extraction { .. } => Some("Check that 7-Zip is installed and the archive is not corrupt"),
            InstallError::Copy { .. } => Some("Check the inner paths of the entry against the archive layout"),
            InstallError::CreateDir { .. } | InstallError::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_errors_keep_their_category() {
        let err = InstallError::from(DownloadError::HttpStatus { url: "u".to_string(), status: 404 });
        assert_eq!(err.stage(), "download");
        assert_eq!(err.category(), "http_status");
        assert!(err.suggestion().unwrap().contains("update the link"));
    }

    #[test]
    fn test_local_errors_use_their_stage() {
        let err = InstallError::Extraction {
            archive: PathBuf::from("a.7z"),
            reason: "exit status 2".to_string(),
        };
        assert_eq!(err.category(), "extract");
        assert!(err.suggestion().is_some());

        let err = InstallError::Io(std::io::Error::other("disk"));
        assert_eq!(err.category(), "io");
        assert_eq!(err.suggestion(), None);
    }
}
