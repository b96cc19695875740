//! # Fetch Module
//!
//! The `Fetcher` trait is the engine's seam to the network: given a URL it
//! returns page content or an error. The engine treats any error as
//! terminal for that URL; there are no retries.
//!
//! The default [`HttpFetcher`] wraps a shared `reqwest` client. Tests
//! inject stub implementations instead, which is what keeps the scheduling
//! engine runnable without a network.

use crate::error::CrawlError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the content of a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the canonical URL, returning the response body.
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError>;
}

/// `reqwest`-backed fetcher used by default.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a fresh HTTP client (rustls, 10 s timeout).
    pub fn new() -> Result<Self, CrawlError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("sitecrawl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one with custom proxy or TLS
    /// settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status(status));
        }
        Ok(response.text().await?)
    }
}
