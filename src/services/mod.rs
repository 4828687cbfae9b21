// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CacheManager, CacheKey, CatalogSnapshot, Snapshot, RankedResults};
pub use catalog::{build_catalog, CatalogError, HttpCatalog, LocationCatalog, StaticCatalog};
