//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::GeocodingService;
use crate::domain::providers::GeocodingProvider;
use crate::infrastructure::cache::CacheService;

/// Process-scoped state, created once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub geocoding_service: Arc<GeocodingService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the geocoding service over the given provider and cache.
    pub fn new(provider: Arc<dyn GeocodingProvider>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            geocoding_service: Arc::new(GeocodingService::new(provider, cache.clone())),
            cache,
        }
    }
}
