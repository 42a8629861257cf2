use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Platform;

/// Placeholder for a title, price, or rating that could not be located.
pub const NOT_FOUND: &str = "Not Found";

/// Discount reported when a page exposes no discount badge.
pub const DEFAULT_DISCOUNT: &str = "0%";

/// Review count reported when a page exposes no review counter.
pub const DEFAULT_REVIEWS: &str = "0";

/// One product observation as read off a page, before it is timestamped.
///
/// Every field holds text exactly as rendered by the site (currency symbols,
/// thousands separators, trailing labels). Missing data is represented by the
/// documented sentinels, never by an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub platform: Platform,
    pub title: String,
    /// Product page URL, or for search-result items the item's own link when
    /// it resolves (the search page URL otherwise).
    pub url: String,
    pub price: String,
    pub discount: String,
    pub rating: String,
    pub reviews: String,
}

impl ScrapedProduct {
    /// Attaches the capture timestamp, producing the final record.
    #[must_use]
    pub fn stamp(self, scraped_at: DateTime<Utc>) -> ProductRecord {
        ProductRecord {
            platform: self.platform,
            title: self.title,
            url: self.url,
            price: self.price,
            discount: self.discount,
            rating: self.rating,
            reviews: self.reviews,
            scraped_at,
        }
    }
}

/// A timestamped product observation handed to exporters and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub platform: Platform,
    pub title: String,
    pub url: String,
    pub price: String,
    pub discount: String,
    pub rating: String,
    pub reviews: String,
    /// Serialized as RFC 3339 text, e.g. `"2024-05-01T09:00:03.120Z"`.
    pub scraped_at: DateTime<Utc>,
}
