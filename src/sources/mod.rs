use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::Snapshot;
use crate::utils::error::{AppError, Result};

pub mod catalog;

pub use catalog::{CatalogSource, PageSelectors};

/// A scrapeable origin of product snapshots.
#[async_trait]
pub trait Source: Send + Sync {
    /// Stable identifier recorded on every snapshot this source produces.
    fn id(&self) -> &str;

    /// Scrape every configured page and return one snapshot per page,
    /// in page order.
    async fn fetch(&self) -> Result<Vec<Snapshot>>;
}

pub type SourceBox = Box<dyn Source>;

/// Registry of source adapters keyed by source identifier.
#[derive(Default)]
pub struct SourceRegistry {
    sources: HashMap<String, SourceBox>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register a source adapter under its own identifier.
    pub fn register(&mut self, source: SourceBox) {
        self.sources.insert(source.id().to_string(), source);
    }

    pub fn get(&self, id: &str) -> Result<&dyn Source> {
        self.sources
            .get(id)
            .map(|s| s.as_ref())
            .ok_or_else(|| AppError::UnknownSource(id.to_string()))
    }

    /// List all registered source identifiers.
    pub fn ids(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }
}
