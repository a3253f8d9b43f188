use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

use crate::http::HttpClient;
use crate::utils::error::Result;

/// Fixed extension for cached product images.
const IMAGE_EXT: &str = "jpg";

/// Flat on-disk cache holding one image per product model.
pub struct ImageCache {
    directory: PathBuf,
    http: HttpClient,
}

impl ImageCache {
    pub fn new(directory: impl Into<PathBuf>, http: HttpClient) -> Self {
        Self {
            directory: directory.into(),
            http,
        }
    }

    /// Deterministic cache filename for a product model: lowercased, with
    /// anything outside `[a-z0-9_-]` replaced by `-`.
    pub fn cache_key(model: &str) -> String {
        let sanitized: String = model
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        format!("{sanitized}.{IMAGE_EXT}")
    }

    /// Resolve the cached image path for a model, downloading when absent.
    ///
    /// An existing non-empty file is returned without touching the network,
    /// so each model is downloaded at most once per cache lifetime. The slot
    /// is keyed by model, not URL: a changed image URL for a known model
    /// reuses the same file.
    pub async fn ensure_cached(&self, image_url: &str, model: &str) -> Result<PathBuf> {
        let target = self.directory.join(Self::cache_key(model));

        if let Ok(metadata) = fs::metadata(&target).await {
            if metadata.len() > 0 {
                debug!("image cache hit for {model}");
                return Ok(target);
            }
        }

        let bytes = self.http.get_bytes(image_url).await?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, &bytes).await?;
        debug!("cached image for {model} at {}", target.display());

        Ok(target)
    }
}
