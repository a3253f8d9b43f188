use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::error::{AppError, Result};

/// One timestamped observation of a tracked product.
///
/// Field order doubles as the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub model: String,
    pub title: String,
    pub sku: Option<String>,
    pub currency: String,
    pub price_eur: f64,
    pub product_url: String,
    pub image_url: String,
    pub image_path: Option<PathBuf>,
}

impl Snapshot {
    /// Calendar day (UTC) this observation belongs to.
    pub fn day_bucket(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Dedupe identity: one price point per model per calendar day.
    ///
    /// The price is keyed by its bit pattern so the tuple is hashable; two
    /// snapshots compare equal here exactly when their floats are identical.
    pub fn identity_key(&self) -> (String, u64, NaiveDate) {
        (self.model.clone(), self.price_eur.to_bits(), self.day_bucket())
    }

    pub fn with_image_path(mut self, path: PathBuf) -> Self {
        self.image_path = Some(path);
        self
    }

    /// Re-check required-field invariants, used when history is loaded back
    /// from disk and a hand-edited or corrupted record could slip in.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(AppError::Validation("snapshot has an empty model".into()));
        }
        if self.title.is_empty() {
            return Err(AppError::Validation(format!(
                "snapshot {} has an empty title",
                self.model
            )));
        }
        if self.product_url.is_empty() {
            return Err(AppError::Validation(format!(
                "snapshot {} has an empty product_url",
                self.model
            )));
        }
        if self.image_url.is_empty() {
            return Err(AppError::Validation(format!(
                "snapshot {} has an empty image_url",
                self.model
            )));
        }
        if !self.price_eur.is_finite() || self.price_eur < 0.0 {
            return Err(AppError::Validation(format!(
                "snapshot {} has an invalid price: {}",
                self.model, self.price_eur
            )));
        }
        Ok(())
    }
}
