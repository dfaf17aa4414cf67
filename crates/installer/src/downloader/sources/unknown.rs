use crate::downloader::core::{DownloadError, DownloadResult, Result};

/// Link on a host no strategy handles
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownSource {
    pub host: String,
    pub link: String,
}

impl UnknownSource {
    pub fn new<H: Into<String>, L: Into<String>>(host: H, link: L) -> Self {
        Self {
            host: host.into(),
            link: link.into(),
        }
    }

    /// Always fails; the caller records the entry
    pub fn download(&self) -> Result<DownloadResult> {
        Err(DownloadError::UnknownHost {
            host: self.host.clone(),
            link: self.link.clone(),
        })
    }
}
