use moka::future::{Cache, CacheBuilder};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use crate::models::{CacheStats, Location, MatchResult};
use crate::services::catalog::{CatalogError, LocationCatalog};

pub type CatalogSnapshot = Arc<Snapshot>;
pub type RankedResults = Arc<Vec<MatchResult>>;

/// One fetch of the catalog, numbered so rankings can be tied to it
#[derive(Debug)]
pub struct Snapshot {
    generation: u64,
    locations: Vec<Arc<Location>>,
}

impl Snapshot {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Deref for Snapshot {
    type Target = [Arc<Location>];

    fn deref(&self) -> &Self::Target {
        &self.locations
    }
}

/// In-process cache for catalog snapshots and ranked results
///
/// Rankings are keyed by snapshot generation and preference fingerprint;
/// query filters are applied to the cached ranking afterwards, so one entry
/// serves every region, country and limit combination.
pub struct CacheManager {
    catalog: Cache<String, CatalogSnapshot>,
    ranked: Cache<String, RankedResults>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheManager {
    pub fn new(max_results: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        let catalog = CacheBuilder::new(1).time_to_live(ttl).build();
        let ranked = CacheBuilder::new(max_results).time_to_live(ttl).build();

        Self {
            catalog,
            ranked,
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Current catalog snapshot, fetched from the source on a miss
    ///
    /// Every fetch starts a new generation and drops rankings of older ones.
    pub async fn catalog(&self, source: &dyn LocationCatalog) -> Result<CatalogSnapshot, CatalogError> {
        let key = CacheKey::catalog();

        if let Some(snapshot) = self.catalog.get(&key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(snapshot);
        }

        tracing::trace!("Cache miss: {}", key);
        let locations = source.get_catalog().await?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot { generation, locations });

        self.ranked.invalidate_all();
        self.catalog.insert(key, snapshot.clone()).await;

        tracing::debug!(
            "Catalog snapshot {} holds {} locations",
            generation,
            snapshot.len()
        );
        Ok(snapshot)
    }

    pub async fn ranked(&self, key: &str) -> Option<RankedResults> {
        match self.ranked.get(key).await {
            Some(results) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Cache hit: {}", key);
                Some(results)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Cache miss: {}", key);
                None
            }
        }
    }

    pub async fn store_ranked(&self, key: String, results: RankedResults) {
        tracing::trace!("Cache set: {}", key);
        self.ranked.insert(key, results).await;
    }

    /// Drop every cached snapshot and ranking
    pub fn invalidate_all(&self) {
        self.catalog.invalidate_all();
        self.ranked.invalidate_all();
        tracing::debug!("Invalidated all cache entries");
    }

    pub async fn stats(&self) -> CacheStats {
        self.ranked.run_pending_tasks().await;

        let hit_count = self.hits.load(Ordering::Relaxed);
        let miss_count = self.misses.load(Ordering::Relaxed);
        let lookups = hit_count + miss_count;

        CacheStats {
            catalog_generation: self.generation.load(Ordering::SeqCst),
            ranked_entries: self.ranked.entry_count(),
            hit_count,
            miss_count,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hit_count as f64 / lookups as f64
            },
        }
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub fn catalog() -> String {
        "catalog:all".to_string()
    }

    /// Key for a ranking of one catalog snapshot under one preference set
    pub fn ranked(generation: u64, fingerprint: &str) -> String {
        format!("ranked:{}:{}", generation, fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::StaticCatalog;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct CountingCatalog {
        inner: StaticCatalog,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LocationCatalog for CountingCatalog {
        async fn get_catalog(&self) -> Result<Vec<Arc<Location>>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_catalog().await
        }
    }

    fn counting_catalog() -> CountingCatalog {
        CountingCatalog {
            inner: StaticCatalog::embedded().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_catalog_fetched_once() {
        let cache = CacheManager::new(10, 60);
        let source = counting_catalog();

        let first = cache.catalog(&source).await.unwrap();
        let second = cache.catalog(&source).await.unwrap();

        assert_eq!(first.len(), 7);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        cache.invalidate_all();
        cache.catalog(&source).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refetch_starts_new_generation() {
        let cache = CacheManager::new(10, 60);
        let source = counting_catalog();

        let first = cache.catalog(&source).await.unwrap();
        let old_key = CacheKey::ranked(first.generation(), "fp");
        cache.store_ranked(old_key.clone(), Arc::new(Vec::new())).await;
        assert!(cache.ranked(&old_key).await.is_some());

        cache.invalidate_all();
        let second = cache.catalog(&source).await.unwrap();

        assert_eq!(second.generation(), first.generation() + 1);
        assert_ne!(CacheKey::ranked(second.generation(), "fp"), old_key);
        assert!(cache.ranked(&old_key).await.is_none());
    }

    #[tokio::test]
    async fn test_ranked_round_trip_and_stats() {
        let cache = CacheManager::new(10, 60);
        let key = CacheKey::ranked(1, "abc");

        assert!(cache.ranked(&key).await.is_none());

        cache.store_ranked(key.clone(), Arc::new(Vec::new())).await;
        let cached = cache.ranked(&key).await;
        assert!(cached.is_some_and(|results| results.is_empty()));

        let stats = cache.stats().await;
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_rate, 0.5);
        assert_eq!(stats.ranked_entries, 1);
        assert_eq!(stats.catalog_generation, 0);
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::catalog(), "catalog:all");
        assert_eq!(CacheKey::ranked(3, "f00d"), "ranked:3:f00d");
    }
}
