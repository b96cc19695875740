//! # Builder Module
//!
//! Provides the `CrawlerBuilder`, a fluent API for constructing and
//! configuring [`Crawler`] instances.
//!
//! ## Overview
//!
//! The builder assembles one crawl run: it parses the seed list, seeds the
//! scope filter and the work queue, and wires the fetch/extract
//! collaborators. Custom `Fetcher`/`LinkExtractor` implementations can be
//! injected, which is how the engine is exercised in tests without a
//! network.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sitecrawl::CrawlerBuilder;
//!
//! let crawler = CrawlerBuilder::new()
//!     .seed_domains("monzo.com")
//!     .max_depth(2)
//!     .delay_ms(500)
//!     .workers(4)
//!     .build()?;
//! crawler.start_crawl().await?;
//! ```

use crate::crawl_url::CrawlUrl;
use crate::crawler::Crawler;
use crate::error::CrawlError;
use crate::extract::{HtmlLinkExtractor, LinkExtractor};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::rate_limit::DomainRateLimiter;
use crate::scheduler::Scheduler;
use crate::scope::ScopeFilter;
use std::sync::Arc;

/// Configuration for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Minimum milliseconds between two fetches to the same registrable
    /// domain.
    pub delay_ms: u64,
    /// Maximum crawl depth; `None` means unbounded.
    pub max_depth: Option<u32>,
    /// Number of concurrent workers sharing the queue.
    pub workers: usize,
    /// Restrict discovery to the seed domains and their subdomains.
    pub limit_to_seeds: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            delay_ms: 1000,
            max_depth: None,
            workers: 1,
            limit_to_seeds: true,
        }
    }
}

/// Fluent constructor for [`Crawler`] instances.
#[derive(Default)]
pub struct CrawlerBuilder {
    config: CrawlConfig,
    seeds: Vec<String>,
    fetcher: Option<Arc<dyn Fetcher>>,
    extractor: Option<Arc<dyn LinkExtractor>>,
}

impl CrawlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds seed domains from a comma-separated list, e.g.
    /// `"monzo.com,example.co.uk"`.
    pub fn seed_domains(mut self, domains: &str) -> Self {
        self.seeds.extend(
            domains
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        );
        self
    }

    /// Adds a single seed domain or URL.
    pub fn seed(mut self, domain: impl Into<String>) -> Self {
        self.seeds.push(domain.into());
        self
    }

    /// Bounds the crawl depth; seeds are depth 0. Unset means unlimited.
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    /// Sets the per-domain politeness delay in milliseconds.
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Sets the number of concurrent workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Toggles limited crawling (scope restricted to seed domains).
    pub fn limit_to_seeds(mut self, limit: bool) -> Self {
        self.config.limit_to_seeds = limit;
        self
    }

    /// Injects a custom page fetcher.
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Injects a custom link extractor.
    pub fn link_extractor(mut self, extractor: impl LinkExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Validates the configuration, parses the seeds, and builds the
    /// crawler.
    ///
    /// A missing or malformed seed list is fatal here: the crawl cannot
    /// begin without at least one valid seed.
    pub fn build(self) -> Result<Crawler, CrawlError> {
        if self.config.workers == 0 {
            return Err(CrawlError::Configuration(
                "workers must be greater than 0".to_string(),
            ));
        }
        if self.seeds.is_empty() {
            return Err(CrawlError::Configuration(
                "at least one seed domain is required".to_string(),
            ));
        }

        let scheduler = Arc::new(Scheduler::new());
        let mut scope = ScopeFilter::new(self.config.limit_to_seeds);

        for seed in &self.seeds {
            let url =
                CrawlUrl::parse(seed, 0).map_err(|_| CrawlError::InvalidSeed(seed.clone()))?;
            scope.allow_domain(url.domain());
            scheduler.enqueue_seed(url);
        }

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new()?),
        };
        let extractor = self
            .extractor
            .unwrap_or_else(|| Arc::new(HtmlLinkExtractor::new()));

        Ok(Crawler::new(
            scheduler,
            Arc::new(DomainRateLimiter::new()),
            Arc::new(scope),
            fetcher,
            extractor,
            self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UrlState;

    #[test]
    fn zero_workers_is_a_configuration_error() {
        let result = CrawlerBuilder::new()
            .seed_domains("monzo.com")
            .workers(0)
            .build();
        assert!(matches!(result, Err(CrawlError::Configuration(_))));
    }

    #[test]
    fn empty_seed_list_is_fatal() {
        let result = CrawlerBuilder::new().seed_domains(" , ,").build();
        assert!(matches!(result, Err(CrawlError::Configuration(_))));
    }

    #[test]
    fn invalid_seed_is_fatal() {
        let result = CrawlerBuilder::new().seed_domains("random_string").build();
        assert!(matches!(result, Err(CrawlError::InvalidSeed(_))));
    }

    #[test]
    fn seeds_are_queued_at_depth_zero() {
        let crawler = CrawlerBuilder::new()
            .seed_domains("monzo.com, example.co.uk")
            .build()
            .unwrap();

        let scheduler = crawler.scheduler();
        assert_eq!(scheduler.queued_len(), 2);
        assert_eq!(
            scheduler.registry().state("monzo.com/"),
            Some(UrlState::Queued)
        );
        assert_eq!(
            scheduler.registry().state("example.co.uk/"),
            Some(UrlState::Queued)
        );
    }
}
