//! HTTP utilities
//!
//! Centralized HTTP client with integrated streaming download functionality.
//! Two reqwest clients are kept: one that follows redirects and pools
//! connections, and a direct one that does neither, for hosts that hand out
//! session-bound links.

use futures::StreamExt;
use reqwest::header::{CONNECTION, CONTENT_TYPE, COOKIE};
use reqwest::{redirect, Client, RequestBuilder};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::downloader::config::DownloadConfig;
use crate::downloader::core::files::{ensure_dir, extension_for_content_type, UNKNOWN_EXTENSION};
use crate::downloader::core::{
    DownloadError, DownloadResult, FileOperation, ProgressCallback, ProgressEvent, Result,
};
use crate::manifest::ManifestEntry;

/// Per-request transport options
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchOptions {
    pub follow_redirects: bool,
    pub keep_alive: bool,
    /// Raw `Cookie` header value
    pub cookie: Option<String>,
}

impl FetchOptions {
    /// Follow redirects over a pooled connection
    pub fn following() -> Self {
        Self {
            follow_redirects: true,
            keep_alive: true,
            cookie: None,
        }
    }

    /// No redirects, connection closed after the response
    pub fn direct() -> Self {
        Self {
            follow_redirects: false,
            keep_alive: false,
            cookie: None,
        }
    }

    pub fn with_cookie<S: Into<String>>(mut self, cookie: S) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

/// HTTP client with integrated download functionality
pub struct HttpClient {
    following: Client,
    direct: Client,
    progress_interval: Duration,
}

impl HttpClient {
    /// Create a new HTTP client from download configuration
    pub fn from_config(config: &DownloadConfig) -> Result<Self> {
        let following = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| client_error("following", e))?;

        let direct = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| client_error("direct", e))?;

        Ok(Self {
            following,
            direct,
            progress_interval: config.progress_interval,
        })
    }

    fn request(&self, url: &str, options: &FetchOptions) -> RequestBuilder {
        let client = if options.follow_redirects { &self.following } else { &self.direct };
        let mut request = client.get(url);
        if !options.keep_alive {
            request = request.header(CONNECTION, "close");
        }
        if let Some(cookie) = &options.cookie {
            request = request.header(COOKIE, cookie);
        }
        request
    }

    async fn send(&self, url: &str, options: &FetchOptions) -> Result<reqwest::Response> {
        let response = self
            .request(url, options)
            .send()
            .await
            .map_err(|e| DownloadError::request(url, e))?;

        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }

    /// Fetch a page body as text
    pub async fn get_text(&self, url: &str, options: &FetchOptions) -> Result<String> {
        debug!("Fetching page: {}", url);
        let response = self.send(url, options).await?;
        response.text().await.map_err(|e| DownloadError::request(url, e))
    }

    /// Download `url` into `dest_dir`, naming the file after the entry
    ///
    /// The extension is taken from the response's content type and stored on
    /// the entry before the file is created, so the on-disk name is always
    /// `entry.full_file_name(true)`. The body is streamed chunk by chunk.
    pub async fn fetch_and_store(
        &self,
        url: &str,
        options: &FetchOptions,
        entry: &mut ManifestEntry,
        dest_dir: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<DownloadResult> {
        debug!("Stream downloading: {} into {}", url, dest_dir.display());
        let response = self.send(url, options).await?;

        let extension = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(extension_for_content_type)
            .unwrap_or(UNKNOWN_EXTENSION);
        entry.set_file_extension(extension);

        ensure_dir(dest_dir).await?;
        let dest_path = dest_dir.join(entry.full_file_name(true));
        let total_size = response.content_length();

        if let Some(callback) = progress {
            callback(ProgressEvent::DownloadStarted {
                url: url.to_string(),
                file: dest_path.display().to_string(),
                total_size,
            });
        }

        let mut file = fs::File::create(&dest_path)
            .await
            .map_err(|e| DownloadError::FileSystem {
                path: dest_path.clone(),
                operation: FileOperation::Create,
                source: e,
            })?;

        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;
        let start_time = Instant::now();
        let mut last_progress_time = start_time;

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| DownloadError::request(url, e))?;

            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::FileSystem {
                    path: dest_path.clone(),
                    operation: FileOperation::Write,
                    source: e,
                })?;

            downloaded += chunk.len() as u64;

            let now = Instant::now();
            if now.duration_since(last_progress_time) >= self.progress_interval {
                if let Some(callback) = progress {
                    let elapsed = start_time.elapsed().as_secs_f64();
                    let speed = if elapsed > 0.0 { downloaded as f64 / elapsed } else { 0.0 };
                    callback(ProgressEvent::DownloadProgress {
                        url: url.to_string(),
                        downloaded,
                        total: total_size,
                        speed_bps: speed,
                    });
                }
                last_progress_time = now;
            }
        }

        file.flush().await.map_err(|e| DownloadError::FileSystem {
            path: dest_path.clone(),
            operation: FileOperation::Write,
            source: e,
        })?;

        if let Some(callback) = progress {
            callback(ProgressEvent::DownloadComplete {
                url: url.to_string(),
                final_size: downloaded,
            });
        }

        debug!("Stream download completed: {} bytes", downloaded);
        Ok(DownloadResult::Downloaded {
            path: dest_path,
            size: downloaded,
        })
    }
}

fn client_error(kind: &str, error: reqwest::Error) -> DownloadError {
    DownloadError::Configuration {
        message: format!("failed to build {} HTTP client: {}", kind, error),
        suggestion: Some("Use a user agent of visible ASCII characters".to_string()),
    }
}
