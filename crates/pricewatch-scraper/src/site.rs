//! Per-URL scrape: navigate, check for blocking, classify, extract.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use pricewatch_core::{AppConfig, ScrapedProduct};
use scraper::Html;

use crate::classify::{classify_for, PageKind};
use crate::error::ScraperError;
use crate::session::PageSession;
use crate::sites::{self, SiteProfile};

/// Lowercase substrings whose presence in the visible page text means the
/// site served a challenge or refusal instead of content.
const BLOCK_MARKERS: &[&str] = &["captcha", "access denied"];

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Pause after navigation for script-rendered content.
    pub settle_delay: Duration,
    /// Upper bound on waiting for the title or result-item element.
    pub element_wait: Duration,
    /// Maximum records taken from one search page.
    pub search_result_limit: usize,
}

impl ScrapeOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            element_wait: Duration::from_secs(config.element_wait_secs),
            search_result_limit: config.search_result_limit,
        }
    }
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(3),
            element_wait: Duration::from_secs(10),
            search_result_limit: 10,
        }
    }
}

/// What one URL produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScrape {
    Product(ScrapedProduct),
    /// Search-page items in page order.
    Listing(Vec<ScrapedProduct>),
}

impl PageScrape {
    #[must_use]
    pub fn into_products(self) -> Vec<ScrapedProduct> {
        match self {
            PageScrape::Product(product) => vec![product],
            PageScrape::Listing(products) => products,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteScraper {
    options: ScrapeOptions,
}

impl SiteScraper {
    #[must_use]
    pub fn new(options: ScrapeOptions) -> Self {
        Self { options }
    }

    /// Scrapes one URL.
    ///
    /// Returns `None` when the platform is unsupported, the page is blocked,
    /// any browser command fails, or the scrape panics. Every such outcome is
    /// logged here; neither an error nor a panic reaches the caller.
    pub async fn scrape_url<S: PageSession>(
        &self,
        session: &mut S,
        url: &str,
        platform: &str,
    ) -> Option<PageScrape> {
        let Some(site) = sites::lookup(platform) else {
            tracing::warn!(platform, url, "unsupported platform; skipping");
            return None;
        };

        let attempt = AssertUnwindSafe(self.scrape_site(session, site, url))
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!(platform, url, error = %e, "scrape failed");
                None
            }
            Err(panic) => {
                tracing::error!(
                    platform,
                    url,
                    panic = panic_message(panic.as_ref()),
                    "scrape panicked"
                );
                None
            }
        }
    }

    async fn scrape_site<S: PageSession>(
        &self,
        session: &mut S,
        site: &'static SiteProfile,
        url: &str,
    ) -> Result<Option<PageScrape>, ScraperError> {
        session.goto(url).await?;
        tokio::time::sleep(self.options.settle_delay).await;

        let source = session.page_source().await?;
        if let Some(marker) = block_marker(&source) {
            tracing::warn!(platform = %site.platform, url, marker, "page blocked; skipping");
            return Ok(None);
        }

        match classify_for(url, site) {
            PageKind::Product => self.scrape_product(session, site).await.map(Some),
            PageKind::Search => self.scrape_search(session, site).await.map(Some),
        }
    }

    async fn scrape_product<S: PageSession>(
        &self,
        session: &mut S,
        site: &'static SiteProfile,
    ) -> Result<PageScrape, ScraperError> {
        if !session.wait_for(site.title_wait, self.options.element_wait).await {
            tracing::debug!(
                platform = %site.platform,
                selector = site.title_wait,
                "title element not found in time"
            );
        }
        let source = session.page_source().await?;
        let page_url = session.current_url().await?;
        let product = site.extract_product(&Html::parse_document(&source), &page_url);
        tracing::debug!(
            platform = %site.platform,
            url = %page_url,
            title = %product.title,
            "product extracted"
        );
        Ok(PageScrape::Product(product))
    }

    async fn scrape_search<S: PageSession>(
        &self,
        session: &mut S,
        site: &'static SiteProfile,
    ) -> Result<PageScrape, ScraperError> {
        let item_css = site.search.item;
        if !session.wait_for(item_css, self.options.element_wait).await {
            tracing::debug!(
                platform = %site.platform,
                selector = item_css,
                "no result items found in time"
            );
        }
        let page_url = session.current_url().await?;
        let fragments = session
            .item_fragments(item_css, self.options.search_result_limit)
            .await?;
        let products =
            extract_listing(site, fragments, &page_url, self.options.search_result_limit);
        tracing::info!(
            platform = %site.platform,
            url = %page_url,
            items = products.len(),
            "search page extracted"
        );
        Ok(PageScrape::Listing(products))
    }
}

fn extract_listing(
    site: &SiteProfile,
    fragments: Vec<Result<String, ScraperError>>,
    page_url: &str,
    limit: usize,
) -> Vec<ScrapedProduct> {
    fragments
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(index, fragment)| match fragment {
            Ok(html) => Some(site.extract_search_item(&Html::parse_fragment(&html), page_url)),
            Err(e) => {
                tracing::warn!(
                    platform = %site.platform,
                    index,
                    error = %e,
                    "skipping unreadable result item"
                );
                None
            }
        })
        .collect()
}

/// First block marker found in the page's visible text, if any.
fn block_marker(source: &str) -> Option<&'static str> {
    let text = visible_text(&Html::parse_document(source)).to_lowercase();
    BLOCK_MARKERS.iter().copied().find(|marker| text.contains(marker))
}

/// Text nodes outside `<script>`, `<style>` and `<noscript>`, with runs of
/// whitespace collapsed to a single space.
fn visible_text(doc: &Html) -> String {
    let mut text = String::new();
    for node in doc.tree.root().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"));
        if !hidden {
            text.push_str(chunk);
            text.push(' ');
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
