//! Platform service for native targets.

use async_trait::async_trait;
use bytes::Bytes;
use log::info;
use reqwest::StatusCode;

use crate::error::LoadError;
use crate::platform::PlatformService;

/// User agent sent with every http request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("geoscript/", env!("CARGO_PKG_VERSION"));

/// Loads data over http using `reqwest`.
#[derive(Debug, Clone)]
pub struct NativePlatformService {
    http_client: reqwest::Client,
}

impl NativePlatformService {
    /// Creates a new service with the default user agent.
    pub fn new() -> Self {
        match Self::with_user_agent(DEFAULT_USER_AGENT) {
            Ok(service) => service,
            Err(err) => {
                log::warn!("Failed to configure http client, using the default one: {err}");
                Self {
                    http_client: reqwest::Client::new(),
                }
            }
        }
    }

    /// Creates a new service that identifies itself with the given user agent.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, LoadError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http_client })
    }
}

impl Default for NativePlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for NativePlatformService {
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, LoadError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            info!("Failed to load {url}: {status}");
            return Err(match status {
                StatusCode::NOT_FOUND | StatusCode::GONE => LoadError::NotFound(url.to_owned()),
                _ => LoadError::Io(format!("{url}: {status}")),
            });
        }

        Ok(response.bytes().await?)
    }
}
