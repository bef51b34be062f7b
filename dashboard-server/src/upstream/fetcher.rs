//! Cache-backed JSON fetching.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CachedJson, ResponseCache};

use super::client::Upstream;
use super::error::FetchError;

/// TTL used when the caller has no particular freshness requirement.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Upstream client with a read-through URL cache.
#[derive(Clone)]
pub struct ApiFetcher {
    upstream: Arc<dyn Upstream>,
    cache: ResponseCache,
}

impl ApiFetcher {
    /// Create a new fetcher that owns `cache`.
    pub fn new(upstream: Arc<dyn Upstream>, cache: ResponseCache) -> Self {
        Self { upstream, cache }
    }

    /// Fetch `url` as JSON, serving from cache while the entry is fresh.
    ///
    /// On a miss the document is fetched, cached for `ttl` and returned.
    /// Errors are not cached.
    pub async fn fetch_json(&self, url: &str, ttl: Duration) -> Result<CachedJson, FetchError> {
        if let Some(cached) = self.cache.get(url).await {
            debug!(url = %redact(url), "cache hit");
            return Ok(cached);
        }

        debug!(url = %redact(url), "cache miss, fetching");
        let value = Arc::new(self.upstream.get_json(url).await?);
        self.cache.set(url, value.clone(), ttl).await;

        Ok(value)
    }
}

/// Strip the query string so credentials never reach the logs.
pub(crate) fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
