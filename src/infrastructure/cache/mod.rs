//! Caching layer for geocoding lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`InMemoryCache`] - Bounded in-process cache with TTL expiry
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! [`run_cache_sweeper`] drops expired entries in the background.

mod memory_cache;
mod null_cache;
mod service;
mod sweeper;

pub use memory_cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECONDS, InMemoryCache};
pub use null_cache::NullCache;
pub use service::{CacheService, CacheStats};
pub use sweeper::run_cache_sweeper;
