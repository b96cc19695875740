//! # sitecrawl
//!
//! A breadth-first web crawler: given a seed set of domains it fetches
//! pages, extracts outbound links, and schedules newly discovered
//! in-scope URLs, subject to a depth limit, a per-domain politeness
//! delay, and domain-scoping rules.
//!
//! The crate is built around a small set of shared structures — the
//! [`Scheduler`]'s work queue, the [`UrlRegistry`] seen-set, and the
//! [`DomainRateLimiter`] timestamp map — that a pool of workers mutates
//! through atomic operations. HTTP fetching and HTML link extraction are
//! collaborators behind the [`Fetcher`] and [`LinkExtractor`] traits, so
//! the scheduling engine runs unchanged against stubs in tests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sitecrawl::CrawlerBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sitecrawl::CrawlError> {
//!     let crawler = CrawlerBuilder::new()
//!         .seed_domains("monzo.com")
//!         .max_depth(2)
//!         .workers(4)
//!         .build()?;
//!     crawler.start_crawl().await
//! }
//! ```

pub mod builder;
pub mod crawl_url;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod prelude;
pub mod rate_limit;
pub mod registry;
pub mod scheduler;
pub mod scope;
pub mod stats;

pub use builder::{CrawlConfig, CrawlerBuilder};
pub use crawl_url::{CrawlUrl, InvalidUrl};
pub use crawler::Crawler;
pub use error::CrawlError;
pub use extract::{HtmlLinkExtractor, LinkExtractor};
pub use fetch::{Fetcher, HttpFetcher};
pub use rate_limit::DomainRateLimiter;
pub use registry::{UrlRegistry, UrlState};
pub use scheduler::{Admission, Scheduler};
pub use scope::ScopeFilter;
pub use stats::StatCollector;

pub use async_trait::async_trait;
pub use tokio;
pub use url::Url;
