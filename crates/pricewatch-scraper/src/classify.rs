//! Product-page vs search-page classification by URL shape.

use crate::sites::{self, SiteProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A single product's detail page.
    Product,
    /// A page listing several item summaries.
    Search,
}

/// Classifies `url` for the given platform key.
///
/// A URL is a product page when its path contains one of the platform's
/// product markers; anything else is a search page. An unrecognised platform
/// classifies as [`PageKind::Product`]. The scraper rejects such platforms
/// before classifying, so this default only matters to direct callers.
#[must_use]
pub fn classify(url: &str, platform: &str) -> PageKind {
    match sites::lookup(platform) {
        Some(site) => classify_for(url, site),
        None => PageKind::Product,
    }
}

pub(crate) fn classify_for(url: &str, site: &SiteProfile) -> PageKind {
    let parsed = url::Url::parse(url);
    let haystack = parsed.as_ref().map_or(url, url::Url::path);
    if site
        .product_markers
        .iter()
        .any(|marker| haystack.contains(marker))
    {
        PageKind::Product
    } else {
        PageKind::Search
    }
}
