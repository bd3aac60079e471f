//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheService, CacheStats};
use crate::domain::entities::GeoPayload;
use async_trait::async_trait;
use chrono::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when caching is disabled with `CACHE_ENABLED=false`. Every lookup is a
/// miss, so every request reaches the upstream provider.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str) -> Option<GeoPayload> {
        None
    }

    async fn set(&self, _key: &str, _value: GeoPayload, _ttl: Option<Duration>) {}

    async fn purge_expired(&self) -> usize {
        0
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
