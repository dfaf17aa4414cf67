//! Error types for the downloader with context for the failure ledger

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a manifest link into a local archive
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The link's host matches none of the supported services
    #[error("No download strategy for host '{host}' (link '{link}')")]
    UnknownHost {
        host: String,
        link: String,
    },

    /// Transport-level failure talking to the server
    #[error("HTTP request to '{url}' failed")]
    HttpRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("HTTP request to '{url}' returned status {status}")]
    HttpStatus {
        url: String,
        status: u16,
    },

    /// Connection could not be established in time
    #[error("Request to '{url}' timed out (check network or the host's availability)")]
    NetworkTimeout {
        url: String,
    },

    /// A link scraped or built from the manifest is not a valid URL
    #[error("Invalid URL '{url}': {suggestion}")]
    InvalidUrl {
        url: String,
        suggestion: String,
        #[source]
        source: url::ParseError,
    },

    /// The locker service refused to hand out a session token
    #[error("Authentication with {service} failed: {message}")]
    Authentication {
        service: String,
        message: String,
    },

    /// File system I/O errors with file context
    #[error("File operation failed on '{path}' while {operation}")]
    FileSystem {
        path: PathBuf,
        operation: FileOperation,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        message: String,
        suggestion: Option<String>,
    },
}

/// Types of file operations for error context
#[derive(Debug, Clone, PartialEq)]
pub enum FileOperation {
    Create,
    Write,
    CreateDir,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Create => write!(f, "creating"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::CreateDir => write!(f, "creating directory"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DownloadError>;

impl DownloadError {
    /// Wrap a reqwest failure for `url`, keeping timeouts distinct
    pub fn request<S: Into<String>>(url: S, error: reqwest::Error) -> Self {
        let url = url.into();
        if error.is_timeout() {
            DownloadError::NetworkTimeout { url }
        } else {
            DownloadError::HttpRequest { url, source: error }
        }
    }

    /// Wrap a URL parse failure for `url` with a hint matching the parse error
    pub fn invalid_url<S: Into<String>>(url: S, error: url::ParseError) -> Self {
        let suggestion = match error {
            url::ParseError::EmptyHost => "URL must have a valid hostname",
            url::ParseError::InvalidPort => "Port number must be between 1 and 65535",
            url::ParseError::RelativeUrlWithoutBase => "URL must be absolute (include http:// or https://)",
            _ => "Check the link in the manifest",
        }
        .to_string();

        DownloadError::InvalidUrl {
            url: url.into(),
            suggestion,
            source: error,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            DownloadError::UnknownHost { .. } => "unknown_host",
            DownloadError::HttpRequest { .. } => "http_request",
            DownloadError::HttpStatus { .. } => "http_status",
            DownloadError::NetworkTimeout { .. } => "network_timeout",
            DownloadError::InvalidUrl { .. } => "invalid_url",
            DownloadError::Authentication { .. } => "authentication",
            DownloadError::FileSystem { .. } => "file_system",
            DownloadError::Configuration { .. } => "configuration",
        }
    }

    /// Get user-friendly suggestion for resolving the error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            DownloadError::UnknownHost { .. } => {
                Some("Use a moddb, github or gofile link, or add a host alias")
            }
            DownloadError::HttpStatus { status: 404, .. } => {
                Some("The file was moved or removed, update the link in the manifest")
            }
            DownloadError::NetworkTimeout { .. } => {
                Some("Check your internet connection and rerun the failed entries")
            }
            DownloadError::InvalidUrl { suggestion, .. } => Some(suggestion),
            DownloadError::Configuration { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}
