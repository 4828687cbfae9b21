use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::config::{CatalogSettings, CatalogSource};
use crate::models::Location;

/// Seed catalog compiled into the binary
const EMBEDDED_CATALOG: &str = include_str!("../../data/locations.json");

/// Errors that can occur when reading the location catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Catalog source returned error: {0}")]
    ApiError(String),

    #[error("Invalid catalog data: {0}")]
    InvalidData(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog misconfigured: {0}")]
    Misconfigured(String),
}

/// Source of location records
///
/// The matching engine needs the whole catalog materialized before scoring;
/// implementations decide how to get it.
#[async_trait]
pub trait LocationCatalog: Send + Sync {
    async fn get_catalog(&self) -> Result<Vec<Arc<Location>>, CatalogError>;

    async fn get_location(&self, id: &str) -> Result<Arc<Location>, CatalogError> {
        self.get_catalog()
            .await?
            .into_iter()
            .find(|location| location.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

/// Catalog documents are either a bare array or wrapped in `{ "locations": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Bare(Vec<Location>),
    Wrapped { locations: Vec<Location> },
}

impl CatalogDocument {
    fn into_locations(self) -> Vec<Location> {
        match self {
            CatalogDocument::Bare(locations) => locations,
            CatalogDocument::Wrapped { locations } => locations,
        }
    }
}

fn parse_catalog(json: &str) -> Result<Vec<Location>, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    Ok(document.into_locations())
}

/// Log data-quality faults; scoring clamps them, so they are warnings only
pub fn report_data_quality(locations: &[Location]) {
    for location in locations {
        for issue in location.data_quality_issues() {
            tracing::warn!("Catalog data quality: location {} ({}): {}", location.id, location.name, issue);
        }
    }
}

/// Fully materialized in-memory catalog
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    locations: Vec<Arc<Location>>,
}

impl StaticCatalog {
    pub fn new(locations: Vec<Location>) -> Self {
        report_data_quality(&locations);
        Self {
            locations: locations.into_iter().map(Arc::new).collect(),
        }
    }

    /// The seed cities shipped with the service
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_catalog(json)?))
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        tracing::debug!("Read catalog file {}", path.as_ref().display());
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[async_trait]
impl LocationCatalog for StaticCatalog {
    async fn get_catalog(&self) -> Result<Vec<Arc<Location>>, CatalogError> {
        Ok(self.locations.clone())
    }

    async fn get_location(&self, id: &str) -> Result<Arc<Location>, CatalogError> {
        self.locations
            .iter()
            .find(|location| location.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

/// Catalog fetched from a remote JSON endpoint on every call
///
/// Wrap it with the cache manager to avoid refetching per request.
pub struct HttpCatalog {
    url: String,
    client: Client,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl LocationCatalog for HttpCatalog {
    async fn get_catalog(&self) -> Result<Vec<Arc<Location>>, CatalogError> {
        tracing::debug!("Fetching catalog from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "Failed to fetch catalog: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let locations = parse_catalog(&body)?;
        report_data_quality(&locations);

        tracing::info!("Fetched {} locations from {}", locations.len(), self.url);
        Ok(locations.into_iter().map(Arc::new).collect())
    }
}

/// Build the catalog configured in settings
pub async fn build_catalog(settings: &CatalogSettings) -> Result<Arc<dyn LocationCatalog>, CatalogError> {
    match settings.source {
        CatalogSource::Embedded => {
            let catalog = StaticCatalog::embedded()?;
            tracing::info!("Loaded {} embedded locations", catalog.len());
            Ok(Arc::new(catalog))
        }
        CatalogSource::File => {
            let path = settings
                .path
                .as_deref()
                .ok_or_else(|| CatalogError::Misconfigured("catalog.path is required for file catalogs".into()))?;
            let catalog = StaticCatalog::from_file(path).await?;
            tracing::info!("Loaded {} locations from {}", catalog.len(), path);
            Ok(Arc::new(catalog))
        }
        CatalogSource::Http => {
            let url = settings
                .url
                .as_deref()
                .ok_or_else(|| CatalogError::Misconfigured("catalog.url is required for http catalogs".into()))?;
            let catalog = HttpCatalog::new(url, Duration::from_secs(settings.timeout_secs))?;
            Ok(Arc::new(catalog))
        }
    }
}
