//! Error types shared across the crawl engine.

use thiserror::Error;

/// Errors surfaced by the crawl engine and its collaborators.
///
/// Fetch-level failures are terminal for the URL that triggered them but
/// never abort the crawl; configuration and seed errors are fatal at
/// startup, before any worker runs.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A seed entry that cannot become a valid crawl URL.
    #[error("invalid seed URL '{0}'")]
    InvalidSeed(String),

    /// Transport-level fetch failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// Statistics export failed to serialize.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
