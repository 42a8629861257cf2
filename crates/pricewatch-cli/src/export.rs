//! On-disk JSON export of scraped records.
//!
//! Layout under the data directory:
//!
//! - `json/products_<YYYYmmdd_HHMMSS>.json`: pretty array for this run
//! - `json/products_latest.json`: the same array, overwritten each run
//! - `historical_data.jsonl`: one record per line, appended across runs

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use pricewatch_core::ProductRecord;

pub(crate) const LATEST_EXPORT: &str = "products_latest.json";
const HISTORY_FILE: &str = "historical_data.jsonl";

/// Files touched by one [`export_records`] call.
#[derive(Debug)]
pub(crate) struct ExportPaths {
    pub snapshot: PathBuf,
    pub latest: PathBuf,
    pub history: PathBuf,
}

/// Path of the most recent export under `data_dir`.
pub(crate) fn latest_export_path(data_dir: &Path) -> PathBuf {
    data_dir.join("json").join(LATEST_EXPORT)
}

/// Write the run snapshot, replace the latest export, and append to history.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or any file cannot be
/// written.
pub(crate) fn export_records(
    data_dir: &Path,
    records: &[ProductRecord],
    exported_at: DateTime<Utc>,
) -> anyhow::Result<ExportPaths> {
    let json_dir = data_dir.join("json");
    fs::create_dir_all(&json_dir)
        .with_context(|| format!("failed to create {}", json_dir.display()))?;

    let body = serde_json::to_string_pretty(records)?;
    let snapshot = json_dir.join(format!(
        "products_{}.json",
        exported_at.format("%Y%m%d_%H%M%S")
    ));
    fs::write(&snapshot, &body)
        .with_context(|| format!("failed to write {}", snapshot.display()))?;

    let latest = latest_export_path(data_dir);
    fs::write(&latest, &body).with_context(|| format!("failed to write {}", latest.display()))?;

    let history = data_dir.join(HISTORY_FILE);
    append_history(&history, records)
        .with_context(|| format!("failed to append to {}", history.display()))?;

    Ok(ExportPaths {
        snapshot,
        latest,
        history,
    })
}

fn append_history(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a JSON array of records written by [`export_records`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a record array.
pub(crate) fn read_records(path: &Path) -> anyhow::Result<Vec<ProductRecord>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pricewatch_core::{Platform, ScrapedProduct, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND};

    use super::*;

    fn record(title: &str) -> ProductRecord {
        ScrapedProduct {
            platform: Platform::Amazon,
            title: title.to_string(),
            url: "https://www.amazon.com/dp/B0".to_string(),
            price: "$10.00".to_string(),
            discount: DEFAULT_DISCOUNT.to_string(),
            rating: NOT_FOUND.to_string(),
            reviews: DEFAULT_REVIEWS.to_string(),
        }
        .stamp(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn writes_snapshot_latest_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap();

        let paths = export_records(dir.path(), &[record("A"), record("B")], at).unwrap();

        assert_eq!(
            paths.snapshot,
            dir.path().join("json").join("products_20240501_093015.json")
        );
        assert_eq!(read_records(&paths.snapshot).unwrap().len(), 2);
        assert_eq!(read_records(&paths.latest).unwrap()[1].title, "B");
        let history = fs::read_to_string(&paths.history).unwrap();
        assert_eq!(history.lines().count(), 2);
    }

    #[test]
    fn history_accumulates_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();

        export_records(dir.path(), &[record("A")], first).unwrap();
        let paths = export_records(dir.path(), &[record("B"), record("C")], second).unwrap();

        let lines: Vec<ProductRecord> = fs::read_to_string(&paths.history)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let titles: Vec<&str> = lines.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert_eq!(read_records(&latest_export_path(dir.path())).unwrap().len(), 2);
    }

    #[test]
    fn read_records_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"title": "x"}"#).unwrap();
        assert!(read_records(&path).is_err());
    }
}
