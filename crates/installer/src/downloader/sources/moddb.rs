//! ModDB download source implementation
//!
//! ModDB links point at an HTML landing page. The page is fetched, the
//! mirror link is scraped from it and then downloaded with redirects on.

use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use crate::downloader::api::moddb_page::parse_download_link;
use crate::downloader::core::{
    DownloadError, DownloadResult, FetchOptions, HttpClient, ProgressCallback, ProgressEvent, Result,
};
use crate::manifest::ManifestEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct ModDbSource {
    /// Scheme and authority that relative page links resolve against
    pub host: String,
    pub page_url: String,
}

impl ModDbSource {
    pub fn new<H: Into<String>, P: Into<String>>(host: H, page_url: P) -> Self {
        Self {
            host: host.into(),
            page_url: page_url.into(),
        }
    }

    /// Absolute URL for a scraped link
    pub fn resolve_link(&self, href: &str) -> Result<String> {
        let base = Url::parse(&self.host).map_err(|e| DownloadError::invalid_url(&self.host, e))?;
        let resolved = base.join(href).map_err(|e| DownloadError::invalid_url(href, e))?;
        Ok(resolved.to_string())
    }

    pub async fn download(
        &self,
        http: &HttpClient,
        entry: &mut ManifestEntry,
        dest_dir: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<DownloadResult> {
        debug!("Fetching ModDB landing page {}", self.page_url);
        let page = http.get_text(&self.page_url, &FetchOptions::direct()).await?;

        let Some(href) = parse_download_link(&page) else {
            warn!("No download link found on {}", self.page_url);
            let reason = format!("no download link on {}", self.page_url);
            if let Some(callback) = progress {
                callback(ProgressEvent::Warning {
                    url: self.page_url.clone(),
                    message: reason.clone(),
                });
            }
            return Ok(DownloadResult::Skipped { reason });
        };

        let url = self.resolve_link(&href)?;
        debug!("ModDB mirror link: {}", url);
        http.fetch_and_store(&url, &FetchOptions::following(), entry, dest_dir, progress)
            .await
    }
}
