use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::{iso_timestamp, Offer, PersistedResult, SearchRequest};

/// Writes sorted search results as JSON files into one directory
pub struct ResultsWriter {
    dir: PathBuf,
}

impl ResultsWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the results directory and any missing parents
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create results directory {}", self.dir.display()))
    }

    /// Persist `flights` for `request`, stamped with the current time
    pub async fn save(&self, request: &SearchRequest, flights: Vec<Offer>) -> Result<PathBuf> {
        self.save_at(request, flights, Utc::now()).await
    }

    /// Persist `flights` for `request`, stamped with `instant`.
    ///
    /// The document goes to a `.tmp` sibling first and is renamed into
    /// place, so an interrupted run never leaves a truncated result file.
    pub async fn save_at(
        &self,
        request: &SearchRequest,
        flights: Vec<Offer>,
        instant: DateTime<Utc>,
    ) -> Result<PathBuf> {
        self.ensure_dir().await?;

        let filename = result_filename(request, &instant);
        let path = self.dir.join(&filename);
        let tmp_path = self.dir.join(format!("{}.tmp", filename));

        let document = PersistedResult {
            search_params: request.clone(),
            flights,
            timestamp: instant,
        };
        let json = serde_json::to_string_pretty(&document)?;

        debug!("Writing {} bytes to {}", json.len(), tmp_path.display());
        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to move results into {}", path.display()))?;

        info!("💾 Results saved to: {}", filename);
        Ok(path)
    }
}

/// `flights_<origin>_<destination>_<departureDate>_<timestamp>.json`
/// with `:` and `.` in the timestamp replaced by `-`
pub fn result_filename(request: &SearchRequest, instant: &DateTime<Utc>) -> String {
    let timestamp = iso_timestamp(instant).replace([':', '.'], "-");
    format!(
        "flights_{}_{}_{}_{}.json",
        request.origin, request.destination, request.departure_date, timestamp
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 5, 3).unwrap() + chrono::Duration::milliseconds(42)
    }

    fn offer(total: &str) -> Offer {
        serde_json::from_value(json!({
            "price": { "grandTotal": total, "currency": "USD" },
            "itineraries": [{ "duration": "PT6H", "segments": [] }]
        }))
        .unwrap()
    }

    #[test]
    fn filename_replaces_colons_and_dots() {
        let request = SearchRequest::one_way("JFK", "LAX", "2024-06-01");
        assert_eq!(
            result_filename(&request, &instant()),
            "flights_JFK_LAX_2024-06-01_2024-05-20T09-05-03-042Z.json"
        );
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let temp = tempdir().expect("failed to create tempdir");
        let writer = ResultsWriter::new(temp.path().join("nested").join("results"));

        writer.ensure_dir().await.unwrap();
        writer.ensure_dir().await.unwrap();

        assert!(writer.dir().is_dir());
    }

    #[tokio::test]
    async fn writes_pretty_document() {
        let temp = tempdir().expect("failed to create tempdir");
        let writer = ResultsWriter::new(temp.path().join("results"));
        let request = SearchRequest::one_way("JFK", "LAX", "2024-06-01");

        let path = writer
            .save_at(&request, vec![offer("50.50"), offer("200.00")], instant())
            .await
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "flights_JFK_LAX_2024-06-01_2024-05-20T09-05-03-042Z.json"
        );

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"searchParams\""));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["timestamp"], json!("2024-05-20T09:05:03.042Z"));
        assert_eq!(value["searchParams"]["origin"], json!("JFK"));
        assert_eq!(value["flights"][0]["price"]["grandTotal"], json!("50.50"));
        assert_eq!(value["flights"][1]["price"]["grandTotal"], json!("200.00"));

        let leftovers: Vec<_> = std::fs::read_dir(writer.dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn same_name_is_overwritten() {
        let temp = tempdir().expect("failed to create tempdir");
        let writer = ResultsWriter::new(temp.path());
        let request = SearchRequest::one_way("JFK", "LAX", "2024-06-01");

        writer.save_at(&request, vec![offer("1.00")], instant()).await.unwrap();
        let path = writer
            .save_at(&request, vec![offer("2.00")], instant())
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["flights"].as_array().unwrap().len(), 1);
        assert_eq!(value["flights"][0]["price"]["grandTotal"], json!("2.00"));
    }
}
