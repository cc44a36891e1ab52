//! Per-user response caching using Moka.
//!
//! Read endpoints memoise their JSON output for a short TTL. Any write to a
//! user's data bumps that user's generation, so entries computed before the
//! write can no longer be looked up.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use moka::sync::Cache;
use serde::Serialize;
use serde_json::Value;
use tally_shared::types::UserId;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default time-to-live for cache entries.
const DEFAULT_TTL_SECS: u64 = 60;

/// Lookup key of a cached response.
///
/// Built by [`ResponseCache::key`], which stamps the owner's current
/// generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    owner: UserId,
    generation: u64,
    operation: &'static str,
    params: String,
}

/// Cache of serialized responses keyed by owner, operation and parameters.
#[derive(Clone)]
pub struct ResponseCache {
    cache: Cache<CacheKey, Arc<Value>>,
    generations: Arc<DashMap<UserId, u64>>,
}

impl ResponseCache {
    /// Creates a cache with default settings: 10 000 entries, 60 second TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            cache,
            generations: Arc::new(DashMap::new()),
        }
    }

    /// Builds the key for `operation` with `params` under the owner's
    /// current generation.
    ///
    /// Take the key before loading data and insert under the same key, so
    /// a write that lands in between makes the result unreachable.
    pub fn key<P: Serialize + ?Sized>(
        &self,
        owner: UserId,
        operation: &'static str,
        params: &P,
    ) -> CacheKey {
        CacheKey {
            owner,
            generation: self.generation(owner),
            operation,
            params: serde_json::to_string(params).unwrap_or_default(),
        }
    }

    /// Returns the cached response for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Value>> {
        self.cache.get(key)
    }

    /// Stores a response and returns the shared copy.
    pub fn insert(&self, key: CacheKey, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        self.cache.insert(key, Arc::clone(&value));
        value
    }

    /// Makes every cached response of `owner` unreachable.
    ///
    /// Old entries stay in memory until their TTL runs out.
    pub fn invalidate_owner(&self, owner: UserId) {
        *self.generations.entry(owner).or_insert(0) += 1;
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    fn generation(&self, owner: UserId) -> u64 {
        self.generations.get(&owner).map_or(0, |g| *g)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
