use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::Source;
use crate::config::CatalogConfig;
use crate::http::HttpClient;
use crate::models::Snapshot;
use crate::normalize::parse_price;
use crate::utils::error::{AppError, Result};

/// Relative catalog pages scraped on every run, in output order.
const PRODUCT_PAGES: [&str; 3] = ["iphone_15.html", "iphone_16.html", "iphone_17.html"];

/// CSS selectors for the fields extracted from a product page.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub title: String,
    pub model: String,
    pub price: String,
    pub sku: String,
    pub image: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            title: ".product-title".to_string(),
            model: ".product-model".to_string(),
            price: ".product-price".to_string(),
            sku: ".product-sku".to_string(),
            image: ".product-image".to_string(),
        }
    }
}

/// Scrapes the static product catalog site page by page.
pub struct CatalogSource {
    base_url: Url,
    selectors: PageSelectors,
    source_id: String,
    currency: String,
    http: HttpClient,
}

impl CatalogSource {
    pub fn new(config: &CatalogConfig, http: HttpClient) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(&config.base_url)?,
            selectors: PageSelectors::default(),
            source_id: config.source.clone(),
            currency: config.currency.clone(),
            http,
        })
    }

    fn parse_page(&self, html: &str, page_url: &Url, timestamp: DateTime<Utc>) -> Result<Snapshot> {
        let document = Html::parse_document(html);

        let title = self.select_text(&document, &self.selectors.title)?;
        let model = self.select_text(&document, &self.selectors.model)?;
        let price_text = self.select_text(&document, &self.selectors.price)?;
        let sku = self.select_text(&document, &self.selectors.sku).ok();
        let image_src = self.select_attr(&document, &self.selectors.image, "src")?;
        let image_url = self.base_url.join(&image_src)?;

        Ok(Snapshot {
            timestamp,
            source: self.source_id.clone(),
            model,
            title,
            sku,
            currency: self.currency.clone(),
            price_eur: parse_price(&price_text)?,
            product_url: page_url.to_string(),
            image_url: image_url.to_string(),
            image_path: None,
        })
    }

    fn select_text(&self, document: &Html, selector: &str) -> Result<String> {
        let element = self.select_element(document, selector)?;
        let text = element
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(AppError::MissingField {
                selector: selector.to_string(),
            });
        }
        Ok(text)
    }

    fn select_attr(&self, document: &Html, selector: &str, attr: &str) -> Result<String> {
        let element = self.select_element(document, selector)?;
        element
            .value()
            .attr(attr)
            .map(str::to_string)
            .ok_or_else(|| AppError::MissingField {
                selector: format!("{selector}[{attr}]"),
            })
    }

    fn select_element<'a>(
        &self,
        document: &'a Html,
        selector: &str,
    ) -> Result<scraper::ElementRef<'a>> {
        let parsed = Selector::parse(selector).map_err(|_| AppError::MissingField {
            selector: selector.to_string(),
        })?;
        document
            .select(&parsed)
            .next()
            .ok_or_else(|| AppError::MissingField {
                selector: selector.to_string(),
            })
    }
}

#[async_trait]
impl Source for CatalogSource {
    fn id(&self) -> &str {
        &self.source_id
    }

    async fn fetch(&self) -> Result<Vec<Snapshot>> {
        // One timestamp per run keeps a batch temporally coherent.
        let timestamp = Utc::now();
        let mut snapshots = Vec::with_capacity(PRODUCT_PAGES.len());

        for page in PRODUCT_PAGES {
            let page_url = self.base_url.join(page)?;
            debug!("scraping product page {page_url}");
            let html = self.http.get_text(page_url.as_str()).await?;
            snapshots.push(self.parse_page(&html, &page_url, timestamp)?);
        }

        Ok(snapshots)
    }
}

/// Guarantee a trailing slash so relative page paths resolve under the base
/// instead of replacing its last segment.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Ok(Url::parse(&normalized)?)
}
