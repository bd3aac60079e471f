//! Cache service trait and statistics.

use async_trait::async_trait;
use chrono::Duration;
use serde::Serialize;

use crate::domain::entities::GeoPayload;

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
    pub capacity: usize,
}

/// Trait for caching geocoding lookups.
///
/// Implementations must be thread-safe. Lookups never fail: a broken backend
/// degrades to a miss and the request goes upstream.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::InMemoryCache`] - Bounded in-process cache with TTL expiry
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the payload stored under `key` if it exists and has not expired.
    ///
    /// Expired entries are reported as a miss but are not removed here.
    async fn get(&self, key: &str) -> Option<GeoPayload>;

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Arguments
    ///
    /// - `key` - Namespaced key, see [`crate::domain::cache_key`]
    /// - `value` - Payload to cache
    /// - `ttl` - Optional lifetime (implementation default if `None`)
    async fn set(&self, key: &str, value: GeoPayload, ttl: Option<Duration>);

    /// Removes expired entries and returns how many were dropped.
    async fn purge_expired(&self) -> usize;

    /// Reports current occupancy.
    async fn stats(&self) -> CacheStats;

    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;
}
