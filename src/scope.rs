//! # Scope Filter Module
//!
//! Decides whether a candidate URL's domain is within the crawl's allowed
//! set.
//!
//! ## Overview
//!
//! Scoping is domain-based (registrable domain, eTLD+1), not exact-host
//! based, so subdomains of an allowed domain are in scope:
//! `blog.monzo.com` passes when `monzo.com` was seeded.
//!
//! The allowed set is built once at startup from the seed list and is
//! independent of the rate limiter's timestamp map; a seeded domain is in
//! scope before its first fetch.

use crate::crawl_url::CrawlUrl;
use std::collections::HashSet;

/// Domain-based admission filter for discovered URLs.
#[derive(Debug)]
pub struct ScopeFilter {
    allowed: HashSet<String>,
    limit_to_seeds: bool,
}

impl ScopeFilter {
    /// Creates an empty filter. With `limit_to_seeds` disabled every valid
    /// identity is allowed; enabled, only domains added via
    /// [`allow_domain`](Self::allow_domain) pass.
    pub fn new(limit_to_seeds: bool) -> Self {
        Self {
            allowed: HashSet::new(),
            limit_to_seeds,
        }
    }

    /// Adds a registrable domain to the allowed set. Called once per seed
    /// at startup; the filter is immutable afterwards.
    pub fn allow_domain(&mut self, domain: impl Into<String>) {
        self.allowed.insert(domain.into());
    }

    /// Whether the candidate's registrable domain is in scope.
    pub fn is_allowed(&self, url: &CrawlUrl) -> bool {
        !self.limit_to_seeds || self.allowed.contains(url.domain())
    }

    /// Number of domains in the allowed set.
    pub fn allowed_len(&self) -> usize {
        self.allowed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> CrawlUrl {
        CrawlUrl::parse(raw, 1).unwrap()
    }

    #[test]
    fn limited_crawling_rejects_unseeded_domains() {
        let mut filter = ScopeFilter::new(true);
        filter.allow_domain("monzo.com");

        assert!(filter.is_allowed(&url("https://monzo.com/about")));
        assert!(!filter.is_allowed(&url("https://other.com/b")));
    }

    #[test]
    fn subdomains_of_an_allowed_domain_are_in_scope() {
        let mut filter = ScopeFilter::new(true);
        filter.allow_domain("monzo.com");

        assert!(filter.is_allowed(&url("https://blog.monzo.com/post")));
        assert!(filter.is_allowed(&url("https://www.blog.monzo.com/post")));
    }

    #[test]
    fn unlimited_crawling_allows_everything_valid() {
        let filter = ScopeFilter::new(false);
        assert!(filter.is_allowed(&url("https://anywhere.org/")));
    }
}
