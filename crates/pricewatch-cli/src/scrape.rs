use chrono::Utc;
use pricewatch_core::AppConfig;
use pricewatch_scraper::{BatchRunner, BrowserOptions, ScrapeOptions, SiteScraper, WebDriverSession};

use crate::export;

/// Run one batch over the configured products file and optionally export it.
///
/// Returns the number of records scraped.
///
/// # Errors
///
/// Returns an error if the browser session cannot be started or the export
/// files cannot be written. Per-URL failures are logged by the batch and do
/// not surface here.
pub(crate) async fn run_scrape(config: &AppConfig, export_records: bool) -> anyhow::Result<usize> {
    let urls = pricewatch_core::load_product_urls_or_empty(&config.products_path);
    if urls.is_empty() {
        tracing::warn!(
            path = %config.products_path.display(),
            "no product urls configured; nothing to scrape"
        );
        return Ok(0);
    }

    let session = WebDriverSession::connect(&BrowserOptions::from_app_config(config)).await?;
    let runner = BatchRunner::new(SiteScraper::new(ScrapeOptions::from_app_config(config)));
    let records = runner.run(session, &urls).await;

    if records.is_empty() {
        tracing::warn!("no data was scraped");
        return Ok(0);
    }

    if export_records {
        let written = export::export_records(&config.data_dir, &records, Utc::now())?;
        tracing::info!(
            records = records.len(),
            snapshot = %written.snapshot.display(),
            latest = %written.latest.display(),
            history = %written.history.display(),
            "export complete"
        );
    } else {
        tracing::info!(records = records.len(), "export skipped");
    }

    Ok(records.len())
}
