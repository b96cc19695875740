//! # Domain Rate Limiter Module
//!
//! Per-domain politeness pacing: tracks the last-fetch timestamp for each
//! registrable domain and decides whether a domain may be fetched now.
//!
//! ## Overview
//!
//! The limiter is the sole mechanism enforcing the politeness delay. It is
//! keyed by registrable domain, not by URL, so many URLs on one domain
//! throttle each other. Timestamps are epoch milliseconds; a domain absent
//! from the map has never been fetched and is immediately eligible.
//!
//! [`DomainRateLimiter::mark_fetched`] is called only immediately before a
//! real fetch is issued, never speculatively, so the recorded timestamp
//! reflects actual request pacing.

use dashmap::DashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as epoch milliseconds.
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Thread-safe last-fetch timestamp map keyed by registrable domain.
#[derive(Debug, Default)]
pub struct DomainRateLimiter {
    last_fetch: DashMap<String, u64>,
}

impl DomainRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the domain may be fetched at `now_ms` given the politeness
    /// delay. A never-fetched domain is always eligible.
    pub fn is_eligible(&self, domain: &str, now_ms: u64, delay_ms: u64) -> bool {
        match self.last_fetch.get(domain) {
            Some(last) => now_ms.saturating_sub(*last) >= delay_ms,
            None => true,
        }
    }

    /// Records that a fetch to the domain is being issued at `now_ms`.
    pub fn mark_fetched(&self, domain: &str, now_ms: u64) {
        self.last_fetch.insert(domain.to_string(), now_ms);
    }

    /// Earliest instant at which the domain becomes eligible again.
    /// Used to stamp cooldown re-offers so workers can wait instead of
    /// spinning.
    pub fn ready_at(&self, domain: &str, delay_ms: u64) -> u64 {
        self.last_fetch
            .get(domain)
            .map(|last| last.saturating_add(delay_ms))
            .unwrap_or(0)
    }

    /// Number of domains the crawl has fetched so far.
    pub fn tracked_domains(&self) -> usize {
        self.last_fetch.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_domain_is_immediately_eligible() {
        let limiter = DomainRateLimiter::new();
        assert!(limiter.is_eligible("monzo.com", 0, 1000));
        assert!(limiter.is_eligible("monzo.com", 1_700_000_000_000, 1000));
    }

    #[test]
    fn cooldown_window_is_enforced() {
        let limiter = DomainRateLimiter::new();
        let t0 = 1_700_000_000_000;

        assert!(limiter.is_eligible("monzo.com", t0, 1000));
        limiter.mark_fetched("monzo.com", t0);

        assert!(!limiter.is_eligible("monzo.com", t0 + 500, 1000));
        assert!(limiter.is_eligible("monzo.com", t0 + 1000, 1000));
        assert!(limiter.is_eligible("monzo.com", t0 + 1500, 1000));
    }

    #[test]
    fn pacing_is_per_domain() {
        let limiter = DomainRateLimiter::new();
        let t0 = 1_700_000_000_000;
        limiter.mark_fetched("monzo.com", t0);

        assert!(!limiter.is_eligible("monzo.com", t0 + 1, 1000));
        assert!(limiter.is_eligible("other.com", t0 + 1, 1000));
        assert_eq!(limiter.tracked_domains(), 1);
    }

    #[test]
    fn ready_at_reports_end_of_cooldown() {
        let limiter = DomainRateLimiter::new();
        assert_eq!(limiter.ready_at("monzo.com", 1000), 0);

        let t0 = 1_700_000_000_000;
        limiter.mark_fetched("monzo.com", t0);
        assert_eq!(limiter.ready_at("monzo.com", 1000), t0 + 1000);
    }
}
