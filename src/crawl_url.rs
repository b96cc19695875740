//! # Crawl URL Module
//!
//! Canonical URL identity used for deduplication, scoping, and rate-limit
//! grouping throughout the engine.
//!
//! ## Overview
//!
//! A [`CrawlUrl`] is the normalized, comparable form of a raw URL string.
//! Construction validates and canonicalizes the input so that semantically
//! identical URLs compare equal:
//!
//! - fragments are stripped (they never affect the fetch target),
//! - a path-less authority gains a trailing `/`,
//! - scheme and host are case-folded and `.`/`..` segments resolved,
//! - the dedup key drops the `http://`/`https://` prefix so the same page
//!   reached via either scheme collapses to one identity.
//!
//! The registrable domain (eTLD+1) is resolved against the Public Suffix
//! List, so `www.blog.monzo.com` groups under `monzo.com` for both scope
//! filtering and politeness pacing.
//!
//! Malformed input never panics or raises: [`CrawlUrl::parse`] returns an
//! [`InvalidUrl`] that callers drop wherever it is encountered.

use thiserror::Error;
use url::{Host, Url};

/// The reason a raw string could not become a [`CrawlUrl`].
///
/// Invalidity is terminal: an invalid candidate never enters the queue and
/// is silently discarded at every discovery site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidUrl {
    /// Not parseable as an absolute http(s) URL, even with an inferred
    /// `https://` prefix.
    #[error("'{0}' is not an absolute http(s) URL")]
    Unparseable(String),

    /// The host has no public-suffix-aware registrable domain (bare IP,
    /// missing host, or single unlisted label).
    #[error("'{0}' has no registrable domain")]
    NoRegistrableDomain(String),
}

/// A validated, canonical URL identity with its crawl depth.
///
/// Immutable once constructed; lifecycle state lives in the
/// [`UrlRegistry`](crate::registry::UrlRegistry), never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlUrl {
    url: Url,
    key: String,
    domain: String,
    depth: u32,
}

impl CrawlUrl {
    /// Validates and normalizes a raw URL string at the given depth.
    ///
    /// Bare-domain input such as `monzo.com` is accepted by retrying once
    /// with an `https://` prefix. Seed URLs are depth 0; a discovered URL
    /// is constructed at its parent's depth + 1.
    pub fn parse(raw: &str, depth: u32) -> Result<Self, InvalidUrl> {
        let mut url = match parse_absolute(raw) {
            Some(url) => url,
            None => parse_absolute(&format!("https://{raw}"))
                .ok_or_else(|| InvalidUrl::Unparseable(raw.to_string()))?,
        };
        url.set_fragment(None);

        let host = match url.host() {
            Some(Host::Domain(host)) => host.to_string(),
            // IP hosts have no registrable domain to group by.
            _ => return Err(InvalidUrl::NoRegistrableDomain(raw.to_string())),
        };
        let domain = registrable_domain(&host)
            .ok_or_else(|| InvalidUrl::NoRegistrableDomain(raw.to_string()))?;

        let key = scheme_stripped(url.as_str()).to_string();

        Ok(CrawlUrl {
            url,
            key,
            domain,
            depth,
        })
    }

    /// The canonical absolute URL string (fragment-free, normalized).
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Borrow of the parsed URL, for fetching and link resolution.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The scheme-stripped identity key used for deduplication.
    ///
    /// `http://monzo.com/` and `https://monzo.com/` share the key
    /// `monzo.com/`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The registrable domain (eTLD+1) of the host.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Number of link hops from the seed set.
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl std::fmt::Display for CrawlUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn parse_absolute(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn scheme_stripped(canonical: &str) -> &str {
    canonical
        .strip_prefix("https://")
        .or_else(|| canonical.strip_prefix("http://"))
        .unwrap_or(canonical)
}

/// Reduce a hostname to its registrable domain via the Public Suffix List.
///
/// Hosts whose suffix is not on the list (e.g. `random_string`) resolve to
/// `None` and the candidate is treated as invalid.
fn registrable_domain(host: &str) -> Option<String> {
    let domain = psl::domain(host.as_bytes())?;
    if !domain.suffix().is_known() {
        return None;
    }
    Some(String::from_utf8_lossy(domain.as_bytes()).into_owned())
}
