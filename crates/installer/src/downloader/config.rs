//! Configuration types for the downloader system

use std::time::Duration;
use tracing::debug;

use crate::downloader::sources::HostKind;

/// Environment variable holding a pre-issued locker session token
pub const GOFILE_TOKEN_VAR: &str = "GOFILE_TOKEN";

/// Configuration for download operations
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub user_agent: String,
    /// Only connecting is bounded; large archives may stream for a long time
    pub connect_timeout: Duration,
    pub max_redirects: usize,
    /// Minimum time between two progress events for one download
    pub progress_interval: Duration,
    /// Extra `(fragment, kind)` host matches tried after the built-in ones
    pub host_aliases: Vec<(String, HostKind)>,
    /// Locker session token; a guest account is created when absent
    pub gofile_token: Option<String>,
    pub gofile_api_base: String,
}

impl DownloadConfig {
    /// Default configuration with `GOFILE_TOKEN` picked up from the environment or `.env`
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment variables from .env file");
        }

        let mut config = Self::default();
        if let Ok(token) = std::env::var(GOFILE_TOKEN_VAR) {
            if !token.trim().is_empty() {
                config.gofile_token = Some(token.trim().to_string());
            }
        }
        config
    }

    /// Treat hosts containing `fragment` as `kind`
    pub fn with_host_alias<S: Into<String>>(mut self, fragment: S, kind: HostKind) -> Self {
        self.host_aliases.push((fragment.into(), kind));
        self
    }

    pub fn with_gofile_token<S: Into<String>>(mut self, token: S) -> Self {
        self.gofile_token = Some(token.into());
        self
    }

    pub fn with_gofile_api_base<S: Into<String>>(mut self, base: S) -> Self {
        self.gofile_api_base = base.into();
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("modpack-installer/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(30),
            max_redirects: 10,
            progress_interval: Duration::from_millis(100),
            host_aliases: Vec::new(),
            gofile_token: None,
            gofile_api_base: "https://api.gofile.io".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DownloadConfig::default();
        assert_eq!(config.progress_interval, Duration::from_millis(100));
        assert!(config.user_agent.starts_with("modpack-installer/"));
        assert!(config.host_aliases.is_empty());
        assert!(config.gofile_token.is_none());
    }

    #[test]
    fn test_builders() {
        let config = DownloadConfig::default()
            .with_host_alias("127.0.0.1", HostKind::GitHub)
            .with_gofile_token("abc")
            .with_user_agent("test-agent");

        assert_eq!(config.host_aliases, vec![("127.0.0.1".to_string(), HostKind::GitHub)]);
        assert_eq!(config.gofile_token.as_deref(), Some("abc"));
        assert_eq!(config.user_agent, "test-agent");
    }
}
