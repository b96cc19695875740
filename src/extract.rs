//! # Link Extraction Module
//!
//! The `LinkExtractor` trait turns fetched page content into a sequence of
//! absolute link strings. Relative hrefs are resolved against the page URL
//! here, so the engine only ever sees absolute candidates.
//!
//! The default [`HtmlLinkExtractor`] selects `a[href]` elements with the
//! `scraper` crate.

use scraper::{Html, Selector};
use url::Url;

/// Extracts outbound links from fetched page content.
pub trait LinkExtractor: Send + Sync {
    /// Returns the absolute URL strings linked from `body`, resolving
    /// relative hrefs against `base` (the page's canonical URL).
    fn extract_links(&self, base: &Url, body: &str) -> Vec<String>;
}

/// HTML `a[href]` extractor backed by `scraper`.
#[derive(Debug, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, base: &Url, body: &str) -> Vec<String> {
        let document = Html::parse_document(body);
        let selector = match Selector::parse("a[href]") {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };

        let mut links = Vec::new();
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_href(base, href) {
                    links.push(absolute);
                }
            }
        }
        links
    }
}

/// Resolves a possibly-relative href to an absolute URL string, skipping
/// anchors and non-navigational schemes.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }
    base.join(href).ok().map(|url| url.to_string())
}
