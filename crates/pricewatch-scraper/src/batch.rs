//! Sequential batch over every configured URL.

use chrono::Utc;
use pricewatch_core::{ProductRecord, ProductUrls};

use crate::session::PageSession;
use crate::site::SiteScraper;

/// Outcome counts for one batch, logged at the end of [`BatchRunner::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub urls: usize,
    pub records: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    scraper: SiteScraper,
}

impl BatchRunner {
    #[must_use]
    pub fn new(scraper: SiteScraper) -> Self {
        Self { scraper }
    }

    /// Scrapes every URL in configuration order and returns the accumulated
    /// records.
    ///
    /// A URL that yields nothing, or whose scrape panics, is logged and
    /// skipped. The session is released once after the last URL whatever
    /// happened before.
    pub async fn run<S: PageSession>(&self, session: S, urls: &ProductUrls) -> Vec<ProductRecord> {
        let (records, _) = self.run_with_summary(session, urls).await;
        records
    }

    /// [`run`](Self::run), also returning the outcome counts.
    pub async fn run_with_summary<S: PageSession>(
        &self,
        mut session: S,
        urls: &ProductUrls,
    ) -> (Vec<ProductRecord>, BatchSummary) {
        let mut records = Vec::new();
        let mut summary = BatchSummary::default();

        tracing::info!(urls = urls.url_count(), "starting batch");

        for entry in urls.iter() {
            for url in &entry.urls {
                summary.urls += 1;
                let platform = entry.platform.as_str();
                match self.scraper.scrape_url(&mut session, url, platform).await {
                    Some(page) => {
                        let scraped_at = Utc::now();
                        let products = page.into_products();
                        tracing::info!(platform, url = %url, records = products.len(), "scraped");
                        records.extend(products.into_iter().map(|p| p.stamp(scraped_at)));
                    }
                    None => {
                        summary.failed += 1;
                        tracing::warn!(platform, url = %url, "no data returned");
                    }
                }
            }
        }

        if let Err(e) = session.release().await {
            tracing::warn!(error = %e, "browser session did not shut down cleanly");
        }

        summary.records = records.len();
        tracing::info!(
            urls = summary.urls,
            records = summary.records,
            failed = summary.failed,
            "batch complete"
        );
        (records, summary)
    }
}
