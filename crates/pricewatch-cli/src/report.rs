//! Per-platform summary of an exported record file.

use std::collections::BTreeMap;
use std::path::Path;

use pricewatch_core::{AppConfig, Platform, ProductRecord};
use pricewatch_scraper::normalize_record;

use crate::export;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlatformSummary {
    pub platform: Platform,
    pub records: usize,
    /// Mean over records with a parseable price.
    pub mean_price: Option<f64>,
    pub max_discount: f64,
    /// Mean over records with a parseable rating.
    pub mean_rating: Option<f64>,
    pub total_reviews: u64,
}

#[derive(Default)]
struct Accumulator {
    records: usize,
    price_sum: f64,
    priced: u32,
    max_discount: f64,
    rating_sum: f64,
    rated: u32,
    total_reviews: u64,
}

/// Summaries in [`Platform::ALL`] order; platforms with no records are omitted.
pub(crate) fn summarize(records: &[ProductRecord]) -> Vec<PlatformSummary> {
    let mut by_platform: BTreeMap<usize, (Platform, Accumulator)> = BTreeMap::new();

    for record in records {
        let order = Platform::ALL
            .iter()
            .position(|p| *p == record.platform)
            .unwrap_or(usize::MAX);
        let (_, acc) = by_platform
            .entry(order)
            .or_insert_with(|| (record.platform, Accumulator::default()));
        let metrics = normalize_record(record);

        acc.records += 1;
        if let Some(price) = metrics.price {
            acc.price_sum += price;
            acc.priced += 1;
        }
        acc.max_discount = acc.max_discount.max(metrics.discount_pct);
        if let Some(rating) = metrics.rating {
            acc.rating_sum += rating;
            acc.rated += 1;
        }
        acc.total_reviews = acc.total_reviews.saturating_add(metrics.reviews);
    }

    by_platform
        .into_values()
        .map(|(platform, acc)| PlatformSummary {
            platform,
            records: acc.records,
            mean_price: (acc.priced > 0).then(|| acc.price_sum / f64::from(acc.priced)),
            max_discount: acc.max_discount,
            mean_rating: (acc.rated > 0).then(|| acc.rating_sum / f64::from(acc.rated)),
            total_reviews: acc.total_reviews,
        })
        .collect()
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub(crate) fn format_summary(summary: &PlatformSummary) -> String {
    format!(
        "{:<11} records={:<4} mean_price={:<10} max_discount={:.0}% mean_rating={:<5} reviews={}",
        summary.platform.as_str(),
        summary.records,
        format_optional(summary.mean_price),
        summary.max_discount,
        format_optional(summary.mean_rating),
        summary.total_reviews,
    )
}

/// Print one summary line per platform.
///
/// # Errors
///
/// Returns an error if the export file cannot be read or parsed.
pub(crate) fn run_report(config: &AppConfig, input: Option<&Path>) -> anyhow::Result<()> {
    let path = input.map_or_else(
        || export::latest_export_path(&config.data_dir),
        Path::to_path_buf,
    );
    let records = export::read_records(&path)?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded export");

    if records.is_empty() {
        println!("no records in {}", path.display());
        return Ok(());
    }

    for summary in summarize(&records) {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pricewatch_core::ScrapedProduct;

    use super::*;

    fn record(
        platform: Platform,
        price: &str,
        discount: &str,
        rating: &str,
        reviews: &str,
    ) -> ProductRecord {
        ScrapedProduct {
            platform,
            title: "x".to_string(),
            url: "https://example.com/".to_string(),
            price: price.to_string(),
            discount: discount.to_string(),
            rating: rating.to_string(),
            reviews: reviews.to_string(),
        }
        .stamp(Utc::now())
    }

    #[test]
    fn aggregates_per_platform_in_platform_order() {
        let records = [
            record(Platform::Jumia, "₦ 10,000", "-20%", "4.0", "10"),
            record(Platform::Amazon, "$20.00", "0%", "4.5", "1,000"),
            record(Platform::Amazon, "$30.00", "-10%", "Not Found", "0"),
            record(Platform::Jumia, "Not Found", "-35%", "3.0", "5"),
        ];

        let summaries = summarize(&records);

        assert_eq!(summaries.len(), 2);
        let amazon = &summaries[0];
        assert_eq!(amazon.platform, Platform::Amazon);
        assert_eq!(amazon.records, 2);
        assert_eq!(amazon.mean_price, Some(25.0));
        assert_eq!(amazon.mean_rating, Some(4.5));
        assert_eq!(amazon.total_reviews, 1000);

        let jumia = &summaries[1];
        assert_eq!(jumia.platform, Platform::Jumia);
        assert_eq!(jumia.mean_price, Some(10_000.0));
        assert!((jumia.max_discount - 35.0).abs() < f64::EPSILON);
        assert_eq!(jumia.mean_rating, Some(3.5));
        assert_eq!(jumia.total_reviews, 15);
    }

    #[test]
    fn missing_numbers_render_as_dash() {
        let summaries = summarize(&[record(Platform::Ebay, "Not Found", "0%", "Not Found", "0")]);
        let line = format_summary(&summaries[0]);
        assert!(line.starts_with("ebay"));
        assert!(line.contains("mean_price=-"));
        assert!(line.contains("mean_rating=-"));
    }

    #[test]
    fn empty_input_has_no_summaries() {
        assert!(summarize(&[]).is_empty());
    }
}
