//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetcher` trait the crawl engine depends on
//! - Building HTTP clients with proper user agent strings
//! - GET requests with a per-call timeout
//! - Error classification
//!
//! No retry happens here; a failed fetch is reported once and the engine
//! decides what to do with it.

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Reasons a single fetch can fail
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within its timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection, DNS, TLS or redirect failure
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read or decoded
    #[error("failed to read body: {0}")]
    Body(String),
}

/// Retrieves raw documents for the crawl engine
///
/// Each call carries its own timeout so discovery and extraction can use
/// different budgets.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL and returns the response body
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, FetchError>;
}

/// HTTP client configuration for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Value sent in the User-Agent header
    pub user_agent: String,

    /// Upper bound on establishing a connection
    pub connect_timeout: Duration,
}

impl FetcherConfig {
    /// Builds a fetcher configuration from the `[user-agent]` section
    pub fn from_user_agent(config: &UserAgentConfig) -> Self {
        Self {
            user_agent: format!("{}/{}", config.crawler_name, config.crawler_version),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self::from_user_agent(&UserAgentConfig::default())
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by a shared `reqwest` client
///
/// The client is built once from an explicit [`FetcherConfig`] and reused
/// for every request of the crawl.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL with the given timeout
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Non-2xx status | `Status(code)` |
    /// | Timeout (connect, headers or body) | `Timeout` |
    /// | Connection refused, DNS, TLS, redirects | `Network` |
    /// | Body decode failure | `Body` |
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

/// Maps a transport error onto [`FetchError`]
fn classify_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout)
    } else if error.is_connect() {
        FetchError::Network(format!("connection failed: {}", error))
    } else {
        FetchError::Network(error.to_string())
    }
}
