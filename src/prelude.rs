//! A "prelude" for users of the `sitecrawl` crate.
//!
//! Re-exports the most commonly used traits and structs so that they can
//! be imported in one line.
//!
//! # Example
//!
//! ```
//! use sitecrawl::prelude::*;
//! ```

pub use crate::{
    // Core structs
    Crawler,
    CrawlerBuilder,
    CrawlUrl,
    // Core traits
    Fetcher,
    LinkExtractor,
    // Essential re-exports for trait implementation
    async_trait,
    CrawlError,
    Url,
};
