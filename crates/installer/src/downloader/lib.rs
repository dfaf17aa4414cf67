//! Main entry point for downloading manifest entries
//!
//! The call chain flows as follows:
//!
//! Installer
//! ↓
//! ModDownloader (this file)
//! ↓
//! HostKind / DownloadSource (sources/mod.rs)
//! ↓
//! GitHubSource / GoFileSource / ModDbSource (sources/*)
//! ↓
//! HttpClient (core/http.rs)

use std::path::Path;
use tracing::{debug, info};

use crate::downloader::api::{GoFileAuthenticator, SessionAuthenticator, SessionToken};
use crate::downloader::config::DownloadConfig;
use crate::downloader::core::{DownloadResult, HttpClient, ProgressCallback, Result};
use crate::downloader::sources::{DownloadSource, HostKind};
use crate::manifest::ManifestEntry;

/// Downloads manifest entries, one strategy per hosting service
pub struct ModDownloader {
    config: DownloadConfig,
    http: HttpClient,
    session: SessionToken,
    progress_callback: Option<ProgressCallback>,
}

impl ModDownloader {
    /// Create a downloader with the default locker authenticator
    pub fn new(config: DownloadConfig) -> Result<Self> {
        let authenticator = GoFileAuthenticator::new(&config)?;
        let http = HttpClient::from_config(&config)?;
        Ok(Self {
            http,
            session: SessionToken::new(Box::new(authenticator)),
            config,
            progress_callback: None,
        })
    }

    /// Replace the locker authenticator
    pub fn with_authenticator<A: SessionAuthenticator + 'static>(mut self, authenticator: A) -> Self {
        self.session = SessionToken::new(Box::new(authenticator));
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Strategy for a link host
    pub fn resolve_host(&self, host: &str) -> HostKind {
        HostKind::resolve_with_aliases(host, &self.config.host_aliases)
    }

    /// Download the entry's archive into `dest_dir`
    ///
    /// On success the entry's file extension is set and the archive lives at
    /// `dest_dir/entry.full_file_name(true)`. Markers have nothing to fetch
    /// and are skipped.
    pub async fn download(&self, entry: &mut ManifestEntry, dest_dir: &Path) -> Result<DownloadResult> {
        let Some(link) = entry.link().cloned() else {
            return Ok(DownloadResult::Skipped {
                reason: format!("{} entries have no link", entry.kind()),
            });
        };

        let kind = self.resolve_host(&link.host);
        let source = DownloadSource::for_link(kind, &link);
        info!("Downloading {} ({})", entry.full_file_name(false), source.description());

        let progress = self.progress_callback.as_ref();
        let result = match source {
            DownloadSource::GitHub(github) => github.download(&self.http, entry, dest_dir, progress).await,
            DownloadSource::GoFile(gofile) => {
                let token = self.session.get().await?;
                gofile.download(&self.http, token, entry, dest_dir, progress).await
            }
            DownloadSource::ModDb(moddb) => moddb.download(&self.http, entry, dest_dir, progress).await,
            DownloadSource::Unknown(unknown) => unknown.download(),
        }?;

        debug!("Download of {} finished: {:?}", link, result);
        Ok(result)
    }
}
