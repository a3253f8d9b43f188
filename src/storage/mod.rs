use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::models::Snapshot;
use crate::utils::error::{AppError, Result};

pub mod csv_store;
pub mod json_store;

/// Overwrite both output files with the canonical merged set.
///
/// Both payloads are rendered and staged as `.tmp` siblings before either
/// target is replaced, so a failure on one target leaves the other
/// untouched.
pub async fn persist(snapshots: &[Snapshot], csv_path: &Path, json_path: &Path) -> Result<()> {
    let json = json_store::to_json(snapshots)?;
    let csv = csv_store::to_csv(snapshots)?;

    for path in [json_path, csv_path] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        ensure_replaceable(path).await?;
    }

    let json_tmp = staging_path(json_path);
    let csv_tmp = staging_path(csv_path);

    fs::write(&json_tmp, &json).await?;
    if let Err(e) = fs::write(&csv_tmp, &csv).await {
        let _ = fs::remove_file(&json_tmp).await;
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&json_tmp, json_path).await {
        let _ = fs::remove_file(&json_tmp).await;
        let _ = fs::remove_file(&csv_tmp).await;
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&csv_tmp, csv_path).await {
        let _ = fs::remove_file(&csv_tmp).await;
        return Err(e.into());
    }

    Ok(())
}

async fn ensure_replaceable(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Err(AppError::Validation(format!(
            "output target {} is a directory",
            path.display()
        ))),
        _ => Ok(()),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("out"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        Snapshot {
            timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            source: "github-pages-catalog".to_string(),
            model: "iphone_15".to_string(),
            title: "iPhone 15".to_string(),
            sku: Some("IP15-128".to_string()),
            currency: "EUR".to_string(),
            price_eur: 799.0,
            product_url: "https://example.com/iphone_15.html".to_string(),
            image_url: "https://example.com/images/iphone_15.jpg".to_string(),
            image_path: None,
        }
    }

    #[test]
    fn test_staging_path_appends_tmp_suffix() {
        assert_eq!(
            staging_path(Path::new("data/prices.json")),
            PathBuf::from("data/prices.json.tmp")
        );
    }

    #[tokio::test]
    async fn test_persist_writes_both_targets() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("prices.csv");
        let json_path = dir.path().join("prices.json");

        persist(&[sample()], &csv_path, &json_path).await.unwrap();

        assert!(csv_path.exists());
        assert!(json_path.exists());
        assert!(!staging_path(&csv_path).exists());
        assert!(!staging_path(&json_path).exists());
    }

    #[tokio::test]
    async fn test_persist_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("nested/out/prices.csv");
        let json_path = dir.path().join("nested/out/prices.json");

        persist(&[sample()], &csv_path, &json_path).await.unwrap();

        assert!(csv_path.exists());
        assert!(json_path.exists());
    }

    #[tokio::test]
    async fn test_unwritable_csv_target_leaves_json_untouched() {
        let dir = TempDir::new().unwrap();
        // A directory squatting on the CSV target path makes it unwritable.
        let csv_path = dir.path().join("prices.csv");
        std::fs::create_dir(&csv_path).unwrap();
        let json_path = dir.path().join("prices.json");

        let result = persist(&[sample()], &csv_path, &json_path).await;

        assert!(result.is_err());
        assert!(!json_path.exists());
        assert!(!staging_path(&json_path).exists());
    }

    #[tokio::test]
    async fn test_unwritable_json_target_leaves_csv_untouched() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("prices.csv");
        let json_path = dir.path().join("prices.json");
        std::fs::create_dir(&json_path).unwrap();

        let result = persist(&[sample()], &csv_path, &json_path).await;

        assert!(result.is_err());
        assert!(!csv_path.exists());
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("prices.csv");
        let json_path = dir.path().join("prices.json");

        persist(&[sample()], &csv_path, &json_path).await.unwrap();

        let mut second = sample();
        second.model = "iphone_16".to_string();
        second.price_eur = 899.0;
        persist(&[second], &csv_path, &json_path).await.unwrap();

        let json = std::fs::read_to_string(&json_path).unwrap();
        assert!(json.contains("iphone_16"));
        assert!(!json.contains("iphone_15"));
    }
}
