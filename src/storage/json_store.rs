use std::path::Path;

use tokio::fs;

use crate::models::Snapshot;
use crate::utils::error::{AppError, Result};

/// Load prior history, treating a missing file as an empty baseline.
///
/// Corrupted JSON and records violating the snapshot invariants both
/// surface as `Validation` errors rather than being dropped silently.
pub async fn read_history(path: &Path) -> Result<Vec<Snapshot>> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let snapshots: Vec<Snapshot> = serde_json::from_str(&raw).map_err(|e| {
        AppError::Validation(format!("corrupted history at {}: {e}", path.display()))
    })?;

    for snapshot in &snapshots {
        snapshot.validate()?;
    }

    Ok(snapshots)
}

/// Render the snapshot set as the persisted JSON array.
pub fn to_json(snapshots: &[Snapshot]) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshots)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample(model: &str, price: f64) -> Snapshot {
        Snapshot {
            timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            source: "github-pages-catalog".to_string(),
            model: model.to_string(),
            title: model.to_string(),
            sku: None,
            currency: "EUR".to_string(),
            price_eur: price,
            product_url: format!("https://example.com/{model}.html"),
            image_url: format!("https://example.com/images/{model}.jpg"),
            image_path: Some(PathBuf::from(format!("data/images/{model}.jpg"))),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let history = read_history(&dir.path().join("absent.json")).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.json");
        let original = vec![sample("iphone_15", 799.0), sample("iphone_16", 899.0)];

        fs::write(&path, to_json(&original).unwrap()).await.unwrap();
        let restored = read_history(&path).await.unwrap();

        assert_eq!(original, restored);
    }

    #[tokio::test]
    async fn test_corrupted_json_is_a_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.json");
        fs::write(&path, "[{\"not\": \"a snapshot\"}]").await.unwrap();

        let result = read_history(&path).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_record_is_a_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.json");
        let mut bad = sample("iphone_15", 799.0);
        bad.title = String::new();
        fs::write(&path, to_json(&[bad]).unwrap()).await.unwrap();

        let result = read_history(&path).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
