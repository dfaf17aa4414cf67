//! GoFile session handling
//!
//! Locker downloads need an `accountToken` cookie. The token is either
//! configured up front or obtained by creating a guest account, and is
//! fetched at most once per downloader.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::downloader::config::DownloadConfig;
use crate::downloader::core::{DownloadError, Result};

const SERVICE: &str = "GoFile";

/// Source of an opaque session token
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    async fn acquire_token(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    status: String,
    #[serde(default)]
    data: Option<AccountData>,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    token: String,
}

/// Default authenticator: configured token, else a new guest account
pub struct GoFileAuthenticator {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GoFileAuthenticator {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DownloadError::Configuration {
                message: format!("failed to build {} API client: {}", SERVICE, e),
                suggestion: Some("Use a user agent of visible ASCII characters".to_string()),
            })?;

        Ok(Self {
            client,
            api_base: config.gofile_api_base.trim_end_matches('/').to_string(),
            token: config.gofile_token.clone(),
        })
    }

    async fn create_guest_account(&self) -> Result<String> {
        let url = format!("{}/accounts", self.api_base);
        debug!("Creating {} guest account via {}", SERVICE, url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| DownloadError::request(&url, e))?;

        if !response.status().is_success() {
            return Err(DownloadError::Authentication {
                service: SERVICE.to_string(),
                message: format!("account creation returned status {}", response.status()),
            });
        }

        let account: AccountResponse = response.json().await.map_err(|e| DownloadError::Authentication {
            service: SERVICE.to_string(),
            message: format!("unexpected account response: {}", e),
        })?;

        match account {
            AccountResponse { status, data: Some(data) } if status == "ok" && !data.token.is_empty() => {
                Ok(data.token)
            }
            AccountResponse { status, .. } => Err(DownloadError::Authentication {
                service: SERVICE.to_string(),
                message: format!("account creation answered with status '{}'", status),
            }),
        }
    }
}

#[async_trait]
impl SessionAuthenticator for GoFileAuthenticator {
    async fn acquire_token(&self) -> Result<String> {
        if let Some(token) = &self.token {
            debug!("Using configured {} token", SERVICE);
            return Ok(token.clone());
        }
        let token = self.create_guest_account().await?;
        info!("Created {} guest session", SERVICE);
        Ok(token)
    }
}

/// Lazily acquired, run-wide session token
pub struct SessionToken {
    authenticator: Box<dyn SessionAuthenticator>,
    token: OnceCell<String>,
}

impl SessionToken {
    pub fn new(authenticator: Box<dyn SessionAuthenticator>) -> Self {
        Self {
            authenticator,
            token: OnceCell::new(),
        }
    }

    /// The token, acquiring it on first use; a failed attempt is retried on the next call
    pub async fn get(&self) -> Result<&str> {
        self.token
            .get_or_try_init(|| self.authenticator.acquire_token())
            .await
            .map(String::as_str)
    }
}
