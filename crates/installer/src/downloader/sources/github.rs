//! GitHub download source implementation

use std::path::Path;
use tracing::debug;

use crate::downloader::core::{DownloadResult, FetchOptions, HttpClient, ProgressCallback, Result};
use crate::manifest::ManifestEntry;

/// Release and archive links; the real file sits behind one or more redirects
#[derive(Debug, Clone, PartialEq)]
pub struct GitHubSource {
    pub url: String,
}

impl GitHubSource {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    pub async fn download(
        &self,
        http: &HttpClient,
        entry: &mut ManifestEntry,
        dest_dir: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<DownloadResult> {
        debug!("GitHub downloading {}", self.url);
        http.fetch_and_store(&self.url, &FetchOptions::following(), entry, dest_dir, progress)
            .await
    }
}
