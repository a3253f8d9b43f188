use tracing::debug;

use crate::config::AppConfig;
use crate::dedupe;
use crate::http::HttpClient;
use crate::images::ImageCache;
use crate::models::Snapshot;
use crate::sources::{CatalogSource, Source, SourceRegistry};
use crate::storage::{self, json_store};
use crate::utils::error::Result;

/// Run one full scrape: fetch, enrich with cached images, merge into the
/// persisted history, write CSV and JSON, and return the merged set.
///
/// Nothing is written until scraping and image enrichment have both
/// succeeded, so a failed run never leaves partial output behind.
pub async fn run(config: &AppConfig) -> Result<Vec<Snapshot>> {
    let http = HttpClient::new(config.http.clone())?;

    let mut registry = SourceRegistry::new();
    registry.register(Box::new(CatalogSource::new(&config.catalog, http.clone())?));
    let source = registry.get(&config.catalog.source)?;

    let scraped = source.fetch().await?;
    debug!("scraped {} snapshots", scraped.len());

    let cache = ImageCache::new(config.output.images_dir.clone(), http);
    let mut enriched = Vec::with_capacity(scraped.len());
    for snapshot in scraped {
        let path = cache.ensure_cached(&snapshot.image_url, &snapshot.model).await?;
        enriched.push(snapshot.with_image_path(path));
    }

    let existing = json_store::read_history(&config.output.json_path).await?;
    debug!("loaded {} prior snapshots", existing.len());

    let merged = dedupe::merge(existing, enriched);

    storage::persist(&merged, &config.output.csv_path, &config.output.json_path).await?;

    Ok(merged)
}
