//! Bounded in-process cache with TTL expiry.

use std::collections::{BTreeSet, HashMap};

use super::service::{CacheService, CacheStats};
use crate::domain::entities::GeoPayload;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;

/// Default entry lifetime: 24 hours.
pub const DEFAULT_TTL_SECONDS: u64 = 60 * 60 * 24;

/// Default capacity.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: GeoPayload,
    expires: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

/// Entry map plus an expiry-ordered index over the same keys.
#[derive(Default)]
struct Entries {
    map: HashMap<String, CacheEntry>,
    by_expiry: BTreeSet<(DateTime<Utc>, String)>,
}

impl Entries {
    fn insert(&mut self, key: &str, entry: CacheEntry) {
        let expires = entry.expires;
        if let Some(old) = self.map.insert(key.to_string(), entry) {
            self.by_expiry.remove(&(old.expires, key.to_string()));
        }
        self.by_expiry.insert((expires, key.to_string()));
    }

    /// Drops every entry with `expires <= now`, earliest first.
    fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let mut purged = 0;
        while self
            .by_expiry
            .first()
            .is_some_and(|(expires, _)| *expires <= now)
        {
            if let Some((_, key)) = self.by_expiry.pop_first() {
                self.map.remove(&key);
                purged += 1;
            }
        }
        purged
    }

    fn evict_earliest(&mut self) -> Option<String> {
        let (_, key) = self.by_expiry.pop_first()?;
        self.map.remove(&key);
        Some(key)
    }

    fn expired_count(&self, now: DateTime<Utc>) -> usize {
        self.by_expiry
            .iter()
            .take_while(|(expires, _)| *expires <= now)
            .count()
    }
}

/// In-memory lookup cache shared by all request handlers.
///
/// Entries are visible only while `expires > now`. Reads never delete; expired
/// entries are dropped by [`CacheService::purge_expired`] (driven by the
/// background sweeper) or when an insert finds the cache full.
///
/// # Capacity Policy
///
/// When inserting a new key into a full cache:
/// 1. All expired entries are purged
/// 2. If still full, the entry with the earliest expiry is evicted
///
/// All TTLs are equal in practice, so the earliest expiry is the oldest write.
/// Both steps walk an expiry-ordered index, so they touch only the entries they
/// remove.
pub struct InMemoryCache {
    entries: RwLock<Entries>,
    default_ttl: Duration,
    max_entries: usize,
}

impl InMemoryCache {
    /// Creates a cache with the given default TTL and capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(default_ttl: Duration, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        debug!(
            "Using InMemoryCache (TTL: {}s, capacity: {})",
            default_ttl.num_seconds(),
            max_entries
        );

        Self {
            entries: RwLock::new(Entries::default()),
            default_ttl,
            max_entries,
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }

    fn insert(&self, key: &str, data: GeoPayload, ttl: Duration) {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut entries = self.entries.write();

        if !entries.map.contains_key(key) && entries.map.len() >= self.max_entries {
            let purged = entries.purge_expired(now);
            if purged > 0 {
                debug!("Cache full: purged {} expired entries", purged);
            }

            if entries.map.len() >= self.max_entries
                && let Some(oldest) = entries.evict_earliest()
            {
                debug!("Cache full: evicted {}", oldest);
            }
        }

        entries.insert(key, CacheEntry { data, expires });
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(
            Duration::seconds(DEFAULT_TTL_SECONDS as i64),
            DEFAULT_MAX_ENTRIES,
        )
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> Option<GeoPayload> {
        let now = Utc::now();
        let entries = self.entries.read();

        match entries.map.get(key) {
            Some(entry) if entry.is_live_at(now) => {
                debug!("Cache HIT: {}", key);
                Some(entry.data.clone())
            }
            Some(_) => {
                debug!("Cache EXPIRED: {}", key);
                None
            }
            None => {
                debug!("Cache MISS: {}", key);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: GeoPayload, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.insert(key, value, ttl);
        debug!("Cache SET: {} (TTL: {}s)", key, ttl.num_seconds());
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        self.entries.write().purge_expired(now)
    }

    async fn stats(&self) -> CacheStats {
        let now = Utc::now();
        let entries = self.entries.read();
        let expired = entries.expired_count(now);

        CacheStats {
            total_entries: entries.map.len(),
            expired_entries: expired,
            valid_entries: entries.map.len() - expired,
            capacity: self.max_entries,
        }
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Location, ZipCoordinates};
    use std::sync::Arc;

    fn zip_payload(zip: &str) -> GeoPayload {
        ZipCoordinates::new(zip, 40.75, -73.99).into()
    }

    #[tokio::test]
    async fn test_set_then_get_returns_same_value() {
        let cache = InMemoryCache::default();
        let value: GeoPayload = Location {
            zip: Some("10019".to_string()),
            city: Some("New York".to_string()),
            state: Some("New York".to_string()),
            state_code: None,
        }
        .into();

        cache.set("coords:40.7648,-73.9808", value.clone(), None).await;

        assert_eq!(cache.get("coords:40.7648,-73.9808").await, Some(value));
    }

    #[tokio::test]
    async fn test_missing_key_is_miss() {
        let cache = InMemoryCache::default();
        assert!(cache.get("zip:10001").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_miss() {
        let cache = InMemoryCache::default();
        cache
            .set("zip:10001", zip_payload("10001"), Some(Duration::seconds(-1)))
            .await;

        assert!(cache.get("zip:10001").await.is_none());
        // Reads never delete
        assert_eq!(cache.len(), 1);
        assert!(cache.get("zip:10001").await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_entry() {
        let cache = InMemoryCache::default();
        cache.set("zip:10001", zip_payload("10001"), None).await;

        let replacement: GeoPayload = ZipCoordinates::new("10001", 1.0, 2.0).into();
        cache.set("zip:10001", replacement.clone(), None).await;

        assert_eq!(cache.get("zip:10001").await, Some(replacement));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_overwrite_revives_expired_entry() {
        let cache = InMemoryCache::default();
        cache
            .set("zip:10001", zip_payload("10001"), Some(Duration::seconds(-1)))
            .await;
        cache.set("zip:10001", zip_payload("10001"), None).await;

        assert!(cache.get("zip:10001").await.is_some());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = InMemoryCache::default();
        cache
            .set("zip:00001", zip_payload("00001"), Some(Duration::seconds(-1)))
            .await;
        cache
            .set("zip:00002", zip_payload("00002"), Some(Duration::seconds(-5)))
            .await;
        cache.set("zip:00003", zip_payload("00003"), None).await;

        assert_eq!(cache.purge_expired().await, 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("zip:00003").await.is_some());
        assert_eq!(cache.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_full_cache_purges_expired_first() {
        let cache = InMemoryCache::new(Duration::hours(24), 2);
        cache
            .set("zip:00001", zip_payload("00001"), Some(Duration::seconds(-1)))
            .await;
        cache.set("zip:00002", zip_payload("00002"), None).await;
        cache.set("zip:00003", zip_payload("00003"), None).await;

        assert_eq!(cache.len(), 2);
        assert!(cache.get("zip:00002").await.is_some());
        assert!(cache.get("zip:00003").await.is_some());
    }

    #[tokio::test]
    async fn test_full_cache_evicts_earliest_expiry() {
        let cache = InMemoryCache::new(Duration::hours(24), 2);
        cache
            .set("zip:00001", zip_payload("00001"), Some(Duration::hours(1)))
            .await;
        cache
            .set("zip:00002", zip_payload("00002"), Some(Duration::hours(2)))
            .await;
        cache.set("zip:00003", zip_payload("00003"), None).await;

        assert_eq!(cache.len(), 2);
        assert!(cache.get("zip:00001").await.is_none());
        assert!(cache.get("zip:00002").await.is_some());
        assert!(cache.get("zip:00003").await.is_some());
    }

    #[tokio::test]
    async fn test_full_cache_overwrite_does_not_evict() {
        let cache = InMemoryCache::new(Duration::hours(24), 2);
        cache.set("zip:00001", zip_payload("00001"), None).await;
        cache.set("zip:00002", zip_payload("00002"), None).await;
        cache.set("zip:00001", zip_payload("00001"), None).await;

        assert!(cache.get("zip:00001").await.is_some());
        assert!(cache.get("zip:00002").await.is_some());
    }

    #[tokio::test]
    async fn test_overwrite_moves_entry_in_eviction_order() {
        let cache = InMemoryCache::new(Duration::hours(24), 2);
        cache
            .set("zip:00001", zip_payload("00001"), Some(Duration::hours(1)))
            .await;
        cache
            .set("zip:00002", zip_payload("00002"), Some(Duration::hours(2)))
            .await;
        cache
            .set("zip:00001", zip_payload("00001"), Some(Duration::hours(3)))
            .await;
        cache.set("zip:00003", zip_payload("00003"), None).await;

        assert_eq!(cache.len(), 2);
        assert!(cache.get("zip:00001").await.is_some());
        assert!(cache.get("zip:00002").await.is_none());
        assert!(cache.get("zip:00003").await.is_some());
    }

    #[tokio::test]
    async fn test_purge_skips_revived_entry() {
        let cache = InMemoryCache::default();
        cache
            .set("zip:10001", zip_payload("10001"), Some(Duration::seconds(-1)))
            .await;
        cache.set("zip:10001", zip_payload("10001"), None).await;

        assert_eq!(cache.purge_expired().await, 0);
        assert_eq!(cache.stats().await.expired_entries, 0);
        assert!(cache.get("zip:10001").await.is_some());
    }

    #[tokio::test]
    async fn test_stats() {
        let cache = InMemoryCache::new(Duration::hours(24), 100);
        cache
            .set("zip:00001", zip_payload("00001"), Some(Duration::seconds(-1)))
            .await;
        cache.set("zip:00002", zip_payload("00002"), None).await;

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.capacity, 100);
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let cache = InMemoryCache::new(Duration::MAX, 10);
        cache.set("zip:10001", zip_payload("10001"), None).await;

        assert!(cache.get("zip:10001").await.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let cache = Arc::new(InMemoryCache::new(Duration::hours(1), 1_000));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let zip = format!("{:05}", i);
                    cache
                        .set(&format!("zip:{}", zip), zip_payload(&zip), None)
                        .await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 16);
    }
}
