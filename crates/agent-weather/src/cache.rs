//! Time-bounded cache of live forecasts, keyed by location key

use crate::api::ForecastPeriod;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe cache for live forecast periods
///
/// Only successful fetches are stored; a failed fetch leaves the cache as it was.
#[derive(Clone)]
pub struct ForecastCache {
    cache: Arc<RwLock<TimedCache<String, ForecastPeriod>>>,
}

impl ForecastCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &str) -> Option<ForecastPeriod> {
        // TimedCache evicts expired entries on read, so this needs the write lock
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: impl Into<String>, value: ForecastPeriod) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key.into(), value);
    }

    /// Get or fetch a value using the provided fetcher function
    ///
    /// If the value exists in cache, it's returned immediately.
    /// Otherwise, the fetcher function is called and an `Ok` result is cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetcher: F) -> Result<ForecastPeriod, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ForecastPeriod, E>>,
    {
        if let Some(value) = self.get(key).await {
            tracing::debug!(key, "Forecast cache hit");
            return Ok(value);
        }

        tracing::debug!(key, "Forecast cache miss");

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;

        Ok(value)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
