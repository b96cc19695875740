//! # Crawler Module
//!
//! The crawl engine: the `Crawler` orchestrator and the worker loop it
//! runs.
//!
//! ## Overview
//!
//! A fixed pool of workers shares one queue, one registry, and one
//! domain-timestamp map. Each worker pops a candidate, applies the
//! politeness and lifecycle checks, fetches through the injected
//! [`Fetcher`](crate::fetch::Fetcher), and routes extracted links back
//! through scope filtering and registry admission.

mod core;
mod worker;

pub use self::core::Crawler;
