//! In-memory TTL cache for upstream JSON responses.
//!
//! Entries are keyed by the request URL. Each entry carries its own expiry,
//! computed from the injected [`Clock`] at insertion time, and a lookup
//! after that instant behaves as a miss. Storage is a bounded `moka` map
//! which also drops entries physically once their real-time TTL elapses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use moka::Expiry;
use moka::future::Cache as MokaCache;
use serde_json::Value;

use crate::clock::Clock;

/// Cached payload, shared between the cache and in-flight responses.
pub type CachedJson = Arc<Value>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 1000 }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedJson,
    expires_at: NaiveDateTime,
    ttl: Duration,
}

/// Per-entry physical expiry for moka, driven by each entry's own TTL.
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// URL → JSON cache with per-entry expiry.
#[derive(Clone)]
pub struct ResponseCache {
    entries: MokaCache<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create a new cache reading time from `clock`.
    pub fn new(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { entries, clock }
    }

    /// Get a cached value if it has not yet expired.
    pub async fn get(&self, key: &str) -> Option<CachedJson> {
        let entry = self.entries.get(key).await?;
        if self.clock.now() < entry.expires_at {
            Some(entry.value)
        } else {
            None
        }
    }

    /// Store a value, replacing any previous entry for `key`.
    pub async fn set(&self, key: impl Into<String>, value: CachedJson, ttl: Duration) {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|d| self.clock.now().checked_add_signed(d))
            .unwrap_or(NaiveDateTime::MAX);

        let entry = CacheEntry {
            value,
            expires_at,
            ttl,
        };
        self.entries.insert(key.into(), entry).await;
    }
}
