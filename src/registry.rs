//! # URL Registry Module
//!
//! The shared seen-set: maps a scheme-stripped identity key to its
//! lifecycle state and enforces at-most-one-entry-per-identity.
//!
//! ## Overview
//!
//! The registry is the single source of truth for "have we seen this URL".
//! Every identity passes through the monotonic lifecycle
//! `Unknown → Queued → Processed` with no reverse transitions; `Processed`
//! is terminal and means a fetch was attempted (success or failure) and
//! will never be repeated.
//!
//! [`UrlRegistry::register_if_absent`] is a single atomic check-and-insert
//! over the backing [`DashMap`], so two workers discovering the same link
//! simultaneously cannot both win the insert. An existing entry is always
//! returned unchanged, preserving its state and its original depth even
//! when the re-discovered identity arrived by a different path.

use crate::crawl_url::CrawlUrl;
use dashmap::DashMap;

/// Lifecycle state of a registered URL identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlState {
    /// Registered but never admitted to the queue.
    Unknown,
    /// Awaiting or pending fetch.
    Queued,
    /// Fetch attempted; terminal.
    Processed,
}

/// Snapshot of a registry entry as observed by `register_if_absent`.
#[derive(Debug, Clone, Copy)]
pub struct EntrySnapshot {
    /// State the entry held when observed.
    pub state: UrlState,
    /// Depth recorded when the entry was first registered.
    pub depth: u32,
}

#[derive(Debug)]
struct UrlEntry {
    url: CrawlUrl,
    state: UrlState,
}

/// Thread-safe registry of every URL identity the crawl has seen.
#[derive(Debug, Default)]
pub struct UrlRegistry {
    entries: DashMap<String, UrlEntry>,
}

impl UrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically inserts a fresh `Unknown` entry for the identity key, or
    /// returns the existing entry untouched.
    ///
    /// The returned snapshot carries the entry's current state and its
    /// original depth; under a race exactly one caller observes the
    /// freshly inserted entry.
    pub fn register_if_absent(&self, url: &CrawlUrl) -> EntrySnapshot {
        let entry = self
            .entries
            .entry(url.key().to_string())
            .or_insert_with(|| UrlEntry {
                url: url.clone(),
                state: UrlState::Unknown,
            });
        EntrySnapshot {
            state: entry.state,
            depth: entry.url.depth(),
        }
    }

    /// Advances an entry from `from` to `to`.
    ///
    /// Returns `false` when the entry is missing or no longer in `from`;
    /// a no-op transition is a benign race loss, not an error, and the
    /// caller simply does not enqueue.
    pub fn transition(&self, key: &str, from: UrlState, to: UrlState) -> bool {
        match self.entries.get_mut(key) {
            Some(mut entry) if entry.state == from => {
                entry.state = to;
                true
            }
            _ => false,
        }
    }

    /// Marks an entry `Processed` regardless of its current state,
    /// committing to a fire-once fetch.
    pub fn mark_processed(&self, key: &str) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.state = UrlState::Processed;
        }
    }

    /// Current state of an identity key, if registered.
    pub fn state(&self, key: &str) -> Option<UrlState> {
        self.entries.get(key).map(|entry| entry.state)
    }

    /// Number of identities ever registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently in the given state.
    pub fn count_in(&self, state: UrlState) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state == state)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(raw: &str, depth: u32) -> CrawlUrl {
        CrawlUrl::parse(raw, depth).unwrap()
    }

    #[test]
    fn fresh_registration_starts_unknown() {
        let registry = UrlRegistry::new();
        let snapshot = registry.register_if_absent(&url("monzo.com", 0));

        assert_eq!(snapshot.state, UrlState::Unknown);
        assert_eq!(snapshot.depth, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rediscovery_preserves_state_and_original_depth() {
        let registry = UrlRegistry::new();
        let first = url("monzo.com/a", 1);
        registry.register_if_absent(&first);
        registry.transition(first.key(), UrlState::Unknown, UrlState::Queued);

        // Same identity rediscovered deeper via another page.
        let snapshot = registry.register_if_absent(&url("monzo.com/a", 5));
        assert_eq!(snapshot.state, UrlState::Queued);
        assert_eq!(snapshot.depth, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn scheme_variants_collapse_to_one_entry() {
        let registry = UrlRegistry::new();
        registry.register_if_absent(&url("http://monzo.com", 0));
        registry.register_if_absent(&url("https://monzo.com", 0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn transition_is_monotonic() {
        let registry = UrlRegistry::new();
        let seed = url("monzo.com", 0);
        registry.register_if_absent(&seed);

        assert!(registry.transition(seed.key(), UrlState::Unknown, UrlState::Queued));
        assert!(registry.transition(seed.key(), UrlState::Queued, UrlState::Processed));
        // Race losses are no-ops, not errors.
        assert!(!registry.transition(seed.key(), UrlState::Unknown, UrlState::Queued));
        assert_eq!(registry.state(seed.key()), Some(UrlState::Processed));
    }

    #[test]
    fn transition_on_missing_key_is_a_noop() {
        let registry = UrlRegistry::new();
        assert!(!registry.transition("nowhere.com/", UrlState::Unknown, UrlState::Queued));
    }

    #[test]
    fn concurrent_registration_inserts_exactly_once() {
        let registry = Arc::new(UrlRegistry::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let candidate = url("monzo.com/popular", 1);
                let snapshot = registry.register_if_absent(&candidate);
                registry.transition(candidate.key(), UrlState::Unknown, UrlState::Queued)
                    && snapshot.state == UrlState::Unknown
            }));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();

        assert_eq!(registry.len(), 1);
        // Exactly one thread wins the Unknown → Queued transition.
        assert_eq!(wins, 1);
    }
}
