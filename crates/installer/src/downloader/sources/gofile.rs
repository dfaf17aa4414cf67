//! GoFile download source implementation

use std::path::Path;
use tracing::debug;

use crate::downloader::core::{DownloadResult, FetchOptions, HttpClient, ProgressCallback, Result};
use crate::manifest::ManifestEntry;

/// Locker link; downloads are bound to an account session cookie
#[derive(Debug, Clone, PartialEq)]
pub struct GoFileSource {
    pub url: String,
}

impl GoFileSource {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    /// Cookie header value carrying the session token
    pub fn session_cookie(token: &str) -> String {
        format!("accountToken={}", token)
    }

    /// Download with the session cookie, no redirects and no connection reuse
    pub async fn download(
        &self,
        http: &HttpClient,
        token: &str,
        entry: &mut ManifestEntry,
        dest_dir: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<DownloadResult> {
        debug!("GoFile downloading {}", self.url);
        let options = FetchOptions::direct().with_cookie(Self::session_cookie(token));
        http.fetch_and_store(&self.url, &options, entry, dest_dir, progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie() {
        assert_eq!(GoFileSource::session_cookie("abc123"), "accountToken=abc123");
    }
}
