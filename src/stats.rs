//! # Statistics Module
//!
//! Collects metrics about the crawl's operation.
//!
//! ## Overview
//!
//! The `StatCollector` tracks how many pages were visited, how discovery
//! admission decisions fell out, and how often the politeness delay forced
//! a re-offer. All counters are atomic so workers update them without
//! coordination; a consistent snapshot backs the `Display` summary and the
//! JSON export.

use crate::error::CrawlError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

// A consistent snapshot of the counters, used for reporting.
struct StatsSnapshot {
    pages_visited: usize,
    pages_fetched: usize,
    fetch_failures: usize,
    bytes_fetched: usize,
    links_discovered: usize,
    urls_enqueued: usize,
    duplicates_skipped: usize,
    out_of_scope: usize,
    beyond_depth: usize,
    cooldown_requeues: usize,
    elapsed: Duration,
}

impl StatsSnapshot {
    fn pages_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.pages_visited as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Atomic counters describing one crawl run.
#[derive(Debug, serde::Serialize)]
pub struct StatCollector {
    #[serde(skip)]
    start_time: Instant,

    /// Fetches committed (the URL was marked `Processed` and a request was
    /// issued, whatever the outcome).
    pub pages_visited: AtomicUsize,
    /// Fetches that returned content.
    pub pages_fetched: AtomicUsize,
    /// Fetches that failed; terminal for the URL, never retried.
    pub fetch_failures: AtomicUsize,
    /// Total body bytes received.
    pub bytes_fetched: AtomicUsize,

    /// Raw link strings returned by the extractor.
    pub links_discovered: AtomicUsize,
    /// Discoveries admitted to the queue.
    pub urls_enqueued: AtomicUsize,
    /// Discoveries whose identity was already registered.
    pub duplicates_skipped: AtomicUsize,
    /// Discoveries rejected by the scope filter.
    pub out_of_scope: AtomicUsize,
    /// Discoveries first seen beyond the depth bound.
    pub beyond_depth: AtomicUsize,

    /// Cooldown re-offers back onto the queue tail.
    pub cooldown_requeues: AtomicUsize,
}

impl StatCollector {
    pub(crate) fn new() -> Self {
        StatCollector {
            start_time: Instant::now(),
            pages_visited: AtomicUsize::new(0),
            pages_fetched: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
            bytes_fetched: AtomicUsize::new(0),
            links_discovered: AtomicUsize::new(0),
            urls_enqueued: AtomicUsize::new(0),
            duplicates_skipped: AtomicUsize::new(0),
            out_of_scope: AtomicUsize::new(0),
            beyond_depth: AtomicUsize::new(0),
            cooldown_requeues: AtomicUsize::new(0),
        }
    }

    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_visited: self.pages_visited.load(Ordering::SeqCst),
            pages_fetched: self.pages_fetched.load(Ordering::SeqCst),
            fetch_failures: self.fetch_failures.load(Ordering::SeqCst),
            bytes_fetched: self.bytes_fetched.load(Ordering::SeqCst),
            links_discovered: self.links_discovered.load(Ordering::SeqCst),
            urls_enqueued: self.urls_enqueued.load(Ordering::SeqCst),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::SeqCst),
            out_of_scope: self.out_of_scope.load(Ordering::SeqCst),
            beyond_depth: self.beyond_depth.load(Ordering::SeqCst),
            cooldown_requeues: self.cooldown_requeues.load(Ordering::SeqCst),
            elapsed: self.start_time.elapsed(),
        }
    }

    pub(crate) fn increment_pages_visited(&self) {
        self.pages_visited.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_pages_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_fetch_failures(&self) {
        self.fetch_failures.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn add_bytes_fetched(&self, bytes: usize) {
        self.bytes_fetched.fetch_add(bytes, Ordering::SeqCst);
    }

    pub(crate) fn increment_links_discovered(&self) {
        self.links_discovered.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_urls_enqueued(&self) {
        self.urls_enqueued.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_duplicates_skipped(&self) {
        self.duplicates_skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_out_of_scope(&self) {
        self.out_of_scope.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_beyond_depth(&self) {
        self.beyond_depth.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_cooldown_requeues(&self) {
        self.cooldown_requeues.fetch_add(1, Ordering::SeqCst);
    }

    /// Serializes the counters to a JSON string.
    pub fn to_json_string(&self) -> Result<String, CrawlError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the counters to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String, CrawlError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for StatCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StatCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();

        writeln!(f, "\nCrawl Statistics")?;
        writeln!(f, "----------------")?;
        writeln!(f, "  duration : {:?}", snapshot.elapsed)?;
        writeln!(f, "  speed    : {:.2} pages/s", snapshot.pages_per_second())?;
        writeln!(
            f,
            "  pages    : visited: {}, fetched: {}, failed: {}, bytes: {}",
            snapshot.pages_visited,
            snapshot.pages_fetched,
            snapshot.fetch_failures,
            snapshot.bytes_fetched
        )?;
        writeln!(
            f,
            "  links    : discovered: {}, enqueued: {}, duplicate: {}, out_of_scope: {}, beyond_depth: {}",
            snapshot.links_discovered,
            snapshot.urls_enqueued,
            snapshot.duplicates_skipped,
            snapshot.out_of_scope,
            snapshot.beyond_depth
        )?;
        writeln!(f, "  pacing   : cooldown requeues: {}", snapshot.cooldown_requeues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = StatCollector::new();
        stats.increment_pages_visited();
        stats.increment_pages_visited();
        stats.increment_fetch_failures();
        stats.add_bytes_fetched(1024);

        assert_eq!(stats.pages_visited.load(Ordering::SeqCst), 2);
        assert_eq!(stats.fetch_failures.load(Ordering::SeqCst), 1);
        assert_eq!(stats.bytes_fetched.load(Ordering::SeqCst), 1024);
    }

    #[test]
    fn json_export_includes_counters() {
        let stats = StatCollector::new();
        stats.increment_urls_enqueued();

        let json = stats.to_json_string().unwrap();
        assert!(json.contains("\"urls_enqueued\":1"));
    }
}
