//! # Scheduler Module
//!
//! The shared crawl frontier: an unbounded lock-free work queue plus the
//! admission logic that decides which discovered URLs enter it.
//!
//! ## Overview
//!
//! The `Scheduler` owns the queue of pending [`CrawlUrl`]s and the
//! [`UrlRegistry`] seen-set. It is explicitly constructed and shared via
//! `Arc` between workers; all cross-worker coordination happens through
//! the atomic operations of these two structures, with no further locking
//! discipline.
//!
//! ## Ordering
//!
//! The queue is FIFO at the logical level, but cooldown re-offers re-enter
//! at the tail carrying a ready-at timestamp, so effective order under
//! contention is "ready in delay order, not discovery order". No fairness
//! across domains is guaranteed beyond the per-domain delay floor.
//!
//! ## Depth pruning
//!
//! A URL first discovered beyond the depth bound is registered but left
//! `Unknown` forever: the registry remembers one entry per identity, so a
//! later, shallower rediscovery does not resurrect it. This is a known
//! non-optimality kept for its simplicity.

use crate::crawl_url::CrawlUrl;
use crate::registry::{UrlRegistry, UrlState};
use crossbeam::queue::SegQueue;
use tracing::trace;

/// A queued identity together with the earliest instant (epoch ms) at
/// which a worker should attempt it. Fresh discoveries carry 0.
#[derive(Debug)]
pub(crate) struct QueuedUrl {
    pub url: CrawlUrl,
    pub ready_at: u64,
}

/// Outcome of offering a discovered URL to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Registered and pushed onto the queue.
    Enqueued,
    /// The identity already had a registry entry (or another worker won
    /// the race to queue it).
    AlreadyKnown,
    /// First seen beyond the depth bound; registered but never queued.
    BeyondDepth,
}

/// Shared work queue and registry for one crawl run.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: SegQueue<QueuedUrl>,
    registry: UrlRegistry,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry backing this scheduler.
    pub fn registry(&self) -> &UrlRegistry {
        &self.registry
    }

    /// Registers a seed URL as queued and pushes it. Duplicate seeds in
    /// the input list collapse to a single entry.
    pub fn enqueue_seed(&self, url: CrawlUrl) {
        let snapshot = self.registry.register_if_absent(&url);
        if snapshot.state == UrlState::Unknown
            && self
                .registry
                .transition(url.key(), UrlState::Unknown, UrlState::Queued)
        {
            trace!("seeding queue with {}", url);
            self.queue.push(QueuedUrl { url, ready_at: 0 });
        }
    }

    /// Offers a discovered URL for admission.
    ///
    /// Only a fresh `Unknown` entry within the depth bound transitions to
    /// `Queued` and enters the queue; the transition is the race arbiter,
    /// so concurrent discoveries of the same link enqueue it exactly once.
    /// The depth compared is the one stored in the registry entry.
    pub fn enqueue_discovered(&self, url: CrawlUrl, max_depth: Option<u32>) -> Admission {
        let snapshot = self.registry.register_if_absent(&url);
        if snapshot.state != UrlState::Unknown {
            return Admission::AlreadyKnown;
        }
        if let Some(max) = max_depth {
            if snapshot.depth > max {
                trace!("pruning {} at depth {} (max {})", url, snapshot.depth, max);
                return Admission::BeyondDepth;
            }
        }
        if !self
            .registry
            .transition(url.key(), UrlState::Unknown, UrlState::Queued)
        {
            return Admission::AlreadyKnown;
        }
        trace!("enqueued {} at depth {}", url, snapshot.depth);
        self.queue.push(QueuedUrl { url, ready_at: 0 });
        Admission::Enqueued
    }

    /// Re-offers a URL whose domain is still cooling down, stamped with
    /// the instant it becomes eligible.
    pub(crate) fn requeue(&self, url: CrawlUrl, ready_at: u64) {
        self.queue.push(QueuedUrl { url, ready_at });
    }

    /// Pops the next queued URL. `None` means this worker observed an
    /// empty queue and terminates.
    pub(crate) fn next(&self) -> Option<QueuedUrl> {
        self.queue.pop()
    }

    /// Number of URLs currently queued.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str, depth: u32) -> CrawlUrl {
        CrawlUrl::parse(raw, depth).unwrap()
    }

    #[test]
    fn seeds_enter_the_queue_once() {
        let scheduler = Scheduler::new();
        scheduler.enqueue_seed(url("monzo.com", 0));
        scheduler.enqueue_seed(url("monzo.com", 0));

        assert_eq!(scheduler.queued_len(), 1);
        assert_eq!(
            scheduler.registry().state("monzo.com/"),
            Some(UrlState::Queued)
        );
    }

    #[test]
    fn discovery_admission_outcomes() {
        let scheduler = Scheduler::new();

        assert_eq!(
            scheduler.enqueue_discovered(url("monzo.com/a", 1), Some(2)),
            Admission::Enqueued
        );
        assert_eq!(
            scheduler.enqueue_discovered(url("monzo.com/a", 1), Some(2)),
            Admission::AlreadyKnown
        );
        assert_eq!(
            scheduler.enqueue_discovered(url("monzo.com/deep", 3), Some(2)),
            Admission::BeyondDepth
        );
        assert_eq!(scheduler.queued_len(), 1);
    }

    #[test]
    fn beyond_depth_urls_stay_pruned_at_shallower_rediscovery() {
        let scheduler = Scheduler::new();

        assert_eq!(
            scheduler.enqueue_discovered(url("monzo.com/a", 5), Some(2)),
            Admission::BeyondDepth
        );
        // The registry kept the depth-5 entry, so the shallower
        // rediscovery is still refused.
        assert_eq!(
            scheduler.enqueue_discovered(url("monzo.com/a", 1), Some(2)),
            Admission::BeyondDepth
        );
        assert_eq!(
            scheduler.registry().state("monzo.com/a"),
            Some(UrlState::Unknown)
        );
    }

    #[test]
    fn unlimited_depth_admits_any_depth() {
        let scheduler = Scheduler::new();
        assert_eq!(
            scheduler.enqueue_discovered(url("monzo.com/deep", 1_000), None),
            Admission::Enqueued
        );
    }

    #[test]
    fn pop_order_is_fifo_with_requeues_at_the_tail() {
        let scheduler = Scheduler::new();
        scheduler.enqueue_seed(url("monzo.com", 0));
        scheduler.enqueue_discovered(url("monzo.com/a", 1), None);

        let first = scheduler.next().unwrap();
        assert_eq!(first.url.key(), "monzo.com/");
        scheduler.requeue(first.url, 42);

        assert_eq!(scheduler.next().unwrap().url.key(), "monzo.com/a");
        let reoffered = scheduler.next().unwrap();
        assert_eq!(reoffered.url.key(), "monzo.com/");
        assert_eq!(reoffered.ready_at, 42);
        assert!(scheduler.next().is_none());
    }
}
