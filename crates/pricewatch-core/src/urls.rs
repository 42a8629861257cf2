//! The `platform → [url, ...]` mapping that drives a batch run.
//!
//! The file is a single JSON object:
//!
//! ```json
//! {
//!   "amazon": ["https://www.amazon.com/dp/B0C1234567"],
//!   "jumia": ["https://www.jumia.com.ng/smartphones/"]
//! }
//! ```
//!
//! Key order is significant: the batch visits platforms in file order and
//! URLs in list order, so the mapping is kept as an ordered list rather than
//! a hash map. Keys stay raw strings; unknown identifiers are reported by the
//! scraper, not rejected here.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::ConfigError;

/// URLs configured for one platform key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUrls {
    pub platform: String,
    pub urls: Vec<String>,
}

/// Ordered mapping of platform identifier to the URLs to visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUrls {
    entries: Vec<PlatformUrls>,
}

impl ProductUrls {
    #[must_use]
    pub fn new(entries: Vec<PlatformUrls>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformUrls> {
        self.entries.iter()
    }

    /// Total number of URLs across all platforms.
    #[must_use]
    pub fn url_count(&self) -> usize {
        self.entries.iter().map(|e| e.urls.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url_count() == 0
    }
}

impl<'de> Deserialize<'de> for ProductUrls {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = ProductUrls;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping platform names to URL lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((platform, urls)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(PlatformUrls { platform, urls });
                }
                Ok(ProductUrls { entries })
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Load the URL mapping from a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::ProductsFileIo`] if the file cannot be read and
/// [`ConfigError::ProductsFileParse`] if it is not a valid mapping.
pub fn load_product_urls(path: &Path) -> Result<ProductUrls, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProductsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::ProductsFileParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Like [`load_product_urls`], but a missing or malformed file yields an
/// empty mapping so the batch runs with zero work instead of failing.
#[must_use]
pub fn load_product_urls_or_empty(path: &Path) -> ProductUrls {
    match load_product_urls(path) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!(error = %e, "products configuration unavailable; nothing to scrape");
            ProductUrls::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn preserves_platform_and_url_order() {
        let json = r#"{
            "jumia": ["https://j/1", "https://j/2"],
            "amazon": ["https://a/1"],
            "ebay": []
        }"#;
        let urls: ProductUrls = serde_json::from_str(json).unwrap();
        let platforms: Vec<&str> = urls.iter().map(|e| e.platform.as_str()).collect();
        assert_eq!(platforms, ["jumia", "amazon", "ebay"]);
        assert_eq!(urls.iter().next().unwrap().urls, ["https://j/1", "https://j/2"]);
        assert_eq!(urls.url_count(), 3);
    }

    #[test]
    fn keeps_unknown_platform_keys() {
        let urls: ProductUrls = serde_json::from_str(r#"{"walmart": ["https://w/1"]}"#).unwrap();
        assert_eq!(urls.iter().next().unwrap().platform, "walmart");
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(serde_json::from_str::<ProductUrls>(r#"["https://a/1"]"#).is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{"ebay": ["https://www.ebay.com/itm/1"]}"#;
        let path = temp_file(&dir, "products.json", json);
        let urls = load_product_urls(&path).unwrap();
        assert_eq!(urls.url_count(), 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_product_urls(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ProductsFileIo { .. }));
    }

    #[test]
    fn load_or_empty_swallows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(load_product_urls_or_empty(&path).is_empty());
    }

    #[test]
    fn load_or_empty_swallows_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "products.json", "{ not json");
        assert!(matches!(
            load_product_urls(&path),
            Err(ConfigError::ProductsFileParse { .. })
        ));
        assert!(load_product_urls_or_empty(&path).is_empty());
    }
}
