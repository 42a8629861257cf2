//! Text-to-number conversion for scraped fields.
//!
//! Records keep the raw strings the page showed; these functions are applied
//! on demand by reporting and never alter a record.

use std::sync::LazyLock;

use pricewatch_core::{ProductRecord, NOT_FOUND};
use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit-run regex"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid decimal regex"));

static GROUPED_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d{3})*").expect("valid grouped-count regex"));

/// Numeric fields derived from a [`ProductRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordMetrics {
    pub price: Option<f64>,
    pub discount_pct: f64,
    pub rating: Option<f64>,
    pub reviews: u64,
}

fn is_missing(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.contains(NOT_FOUND)
}

/// Price as a number: every character other than digits and `.` is dropped
/// before parsing, so `"$1,299.99"` → `1299.99` and `"₦ 145,000"` → `145000`.
///
/// `None` for the sentinel, empty text, or text that is still not a number
/// after cleaning.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    if is_missing(text) {
        return None;
    }
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

/// Discount percentage from its first digit run (`"10% OFF"` → `10.0`,
/// `"-17%"` → `17.0`), or `0.0` when there is none.
#[must_use]
pub fn parse_discount(text: &str) -> f64 {
    if is_missing(text) {
        return 0.0;
    }
    DIGIT_RUN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// First decimal number in the text (`"4.5"`, `"4.5 out of 5"`).
#[must_use]
pub fn parse_rating(text: &str) -> Option<f64> {
    if is_missing(text) {
        return None;
    }
    DECIMAL.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Review count with group separators removed (`"1,234"` → `1234`), or `0`.
#[must_use]
pub fn parse_reviews(text: &str) -> u64 {
    GROUPED_COUNT
        .find(text)
        .map(|m| m.as_str().replace([',', '.'], ""))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

#[must_use]
pub fn normalize_record(record: &ProductRecord) -> RecordMetrics {
    RecordMetrics {
        price: parse_price(&record.price),
        discount_pct: parse_discount(&record.discount),
        rating: parse_rating(&record.rating),
        reviews: parse_reviews(&record.reviews),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
