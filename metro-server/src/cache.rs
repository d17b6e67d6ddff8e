//! Read-through cache over a [`DocumentStore`].
//!
//! Whole collections are cached for a fixed TTL, so a record changed in the
//! backing store is visible to routing at most `ttl` later. Disabled unless
//! configured; without it every request reads the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{LineStop, Poi, Station, Waypoint};
use crate::store::{DocumentStore, StoreError};

/// One cached collection. The unit key holds the whole collection.
type CollectionCache<T> = MokaCache<(), Arc<Vec<T>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Staleness bound for cached collections.
    pub ttl: Duration,

    /// Maximum number of cached entries per collection.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1,
        }
    }
}

fn collection_cache<T: Send + Sync + 'static>(config: &CacheConfig) -> CollectionCache<T> {
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

async fn read_through<T, F>(
    cache: &CollectionCache<T>,
    name: &'static str,
    load: F,
) -> Result<Vec<T>, StoreError>
where
    T: Clone + Send + Sync + 'static,
    F: Future<Output = Result<Vec<T>, StoreError>>,
{
    if let Some(cached) = cache.get(&()).await {
        return Ok(cached.as_ref().clone());
    }

    let fresh = Arc::new(load.await?);
    debug!(collection = name, records = fresh.len(), "cached collection");
    cache.insert((), fresh.clone()).await;

    Ok(fresh.as_ref().clone())
}

/// Store wrapper caching each collection after its first load.
///
/// Failed loads are not cached.
pub struct CachedStore<S> {
    inner: S,
    stations: CollectionCache<Station>,
    line_stops: CollectionCache<LineStop>,
    waypoints: CollectionCache<Waypoint>,
    pois: CollectionCache<Poi>,
}

impl<S: DocumentStore> CachedStore<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        Self {
            inner,
            stations: collection_cache(config),
            line_stops: collection_cache(config),
            waypoints: collection_cache(config),
            pois: collection_cache(config),
        }
    }

    /// Access the underlying store for reads that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every cached collection.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.line_stops.invalidate_all();
        self.waypoints.invalidate_all();
        self.pois.invalidate_all();
    }
}

impl<S: DocumentStore> DocumentStore for CachedStore<S> {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        read_through(&self.stations, "stations", self.inner.stations()).await
    }

    async fn line_stops(&self) -> Result<Vec<LineStop>, StoreError> {
        read_through(&self.line_stops, "network", self.inner.line_stops()).await
    }

    async fn waypoints(&self) -> Result<Vec<Waypoint>, StoreError> {
        read_through(&self.waypoints, "waypoints", self.inner.waypoints()).await
    }

    async fn pois(&self) -> Result<Vec<Poi>, StoreError> {
        read_through(&self.pois, "pois", self.inner.pois()).await
    }
}
