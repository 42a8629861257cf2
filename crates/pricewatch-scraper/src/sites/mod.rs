//! Per-site dispatch table.
//!
//! Each supported platform contributes one [`SiteProfile`]: the URL markers
//! that identify its product pages, the element to wait for before reading a
//! product page, and the field rules for product pages and search-result
//! items. Supporting another site means adding a module and a table entry.

mod aliexpress;
mod amazon;
mod ebay;
mod jumia;

use pricewatch_core::{Platform, ScrapedProduct, DEFAULT_DISCOUNT};
use scraper::Html;

use crate::extract::{first_match, FieldRule, Strategy};

/// Field rules for a product detail page.
#[derive(Debug)]
pub struct ProductRules {
    pub title: FieldRule,
    pub price: FieldRule,
    pub discount: FieldRule,
    pub rating: FieldRule,
    pub reviews: FieldRule,
}

/// Field rules for one item on a search-results page.
///
/// Search cards carry no discount rule: every item reports `"0%"`.
#[derive(Debug)]
pub struct SearchRules {
    /// Selector for one result card; each match is extracted independently.
    pub item: &'static str,
    /// Strategies yielding the card's product link (usually an `href`).
    pub link: &'static [Strategy],
    pub title: FieldRule,
    pub price: FieldRule,
    pub rating: FieldRule,
    pub reviews: FieldRule,
}

#[derive(Debug)]
pub struct SiteProfile {
    pub platform: Platform,
    /// URL path fragments that mark a product detail page.
    pub product_markers: &'static [&'static str],
    /// Element whose presence means the product page has rendered.
    pub title_wait: &'static str,
    pub product: ProductRules,
    pub search: SearchRules,
}

impl SiteProfile {
    /// Extracts a product record from a rendered product page.
    ///
    /// `page_url` is the browser's current URL, recorded as-is.
    #[must_use]
    pub fn extract_product(&self, doc: &Html, page_url: &str) -> ScrapedProduct {
        let root = doc.root_element();
        let rules = &self.product;
        ScrapedProduct {
            platform: self.platform,
            title: rules.title.extract(root),
            url: page_url.to_string(),
            price: rules.price.extract(root),
            discount: rules.discount.extract(root),
            rating: rules.rating.extract(root),
            reviews: rules.reviews.extract(root),
        }
    }

    /// Extracts a product record from one search-result card.
    ///
    /// The item's link is resolved against `page_url`; when the card has no
    /// usable link the record points at the search page itself.
    #[must_use]
    pub fn extract_search_item(&self, item: &Html, page_url: &str) -> ScrapedProduct {
        let root = item.root_element();
        let rules = &self.search;
        let url = first_match(rules.link, root)
            .and_then(|href| resolve_link(page_url, &href))
            .unwrap_or_else(|| page_url.to_string());
        ScrapedProduct {
            platform: self.platform,
            title: rules.title.extract(root),
            url,
            price: rules.price.extract(root),
            discount: DEFAULT_DISCOUNT.to_string(),
            rating: rules.rating.extract(root),
            reviews: rules.reviews.extract(root),
        }
    }
}

static SITES: [SiteProfile; 4] = [
    amazon::PROFILE,
    ebay::PROFILE,
    aliexpress::PROFILE,
    jumia::PROFILE,
];

/// Profile for a known platform.
#[must_use]
pub fn profile(platform: Platform) -> &'static SiteProfile {
    match platform {
        Platform::Amazon => &SITES[0],
        Platform::Ebay => &SITES[1],
        Platform::Aliexpress => &SITES[2],
        Platform::Jumia => &SITES[3],
    }
}

/// Profile for a configuration key, or `None` for an unsupported platform.
#[must_use]
pub fn lookup(platform: &str) -> Option<&'static SiteProfile> {
    platform.parse::<Platform>().ok().map(profile)
}

/// Absolute URL for `href` relative to `base`. `javascript:` and fragment-only
/// links are rejected.
fn resolve_link(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    match url::Url::parse(base) {
        Ok(base) => base.join(href).ok().map(String::from),
        Err(_) => url::Url::parse(href).ok().map(String::from),
    }
}
