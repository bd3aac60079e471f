//! ZIP ↔ coordinates lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use super::single_flight::SingleFlight;
use crate::domain::cache_key;
use crate::domain::entities::{GeoPayload, Location, ZipCoordinates};
use crate::domain::providers::GeocodingProvider;
use crate::domain::validation;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// A lookup result and whether it was served from cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<T> {
    pub data: T,
    pub cached: bool,
}

impl<T> Lookup<T> {
    fn hit(data: T) -> Self {
        Self { data, cached: true }
    }

    fn fresh(data: T) -> Self {
        Self {
            data,
            cached: false,
        }
    }
}

/// Validates requests, consults the cache, and falls back to the upstream provider.
///
/// # Request Flow
///
/// 1. Validate input (reject early)
/// 2. Cache lookup (return on hit)
/// 3. Claim the key's single-flight slot and re-check the cache
/// 4. Query the provider
/// 5. Store the result and return it
///
/// Not-found results and failures are never cached.
pub struct GeocodingService {
    provider: Arc<dyn GeocodingProvider>,
    cache: Arc<dyn CacheService>,
    flights: SingleFlight,
}

impl GeocodingService {
    /// Creates a new geocoding service.
    pub fn new(provider: Arc<dyn GeocodingProvider>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            provider,
            cache,
            flights: SingleFlight::new(),
        }
    }

    /// Resolves a US ZIP code to coordinates.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] (`Invalid ZIP code`) if `zip` is not five ASCII digits
    /// - [`AppError::NotFound`] (`ZIP code not found`) if the provider has no match
    /// - [`AppError::Internal`] (`Failed to fetch coordinates`) on any upstream failure
    pub async fn coordinates_for_zip(&self, zip: &str) -> Result<Lookup<ZipCoordinates>, AppError> {
        validation::validate_zip(zip)?;

        let key = cache_key::zip(zip);

        if let Some(hit) = self.cached(&key, GeoPayload::into_zip).await {
            return Ok(Lookup::hit(hit));
        }

        let _flight = self.flights.acquire(&key).await;

        if let Some(hit) = self.cached(&key, GeoPayload::into_zip).await {
            debug!("Coalesced ZIP lookup for {}", zip);
            return Ok(Lookup::hit(hit));
        }

        let coords = self
            .provider
            .search_postcode(zip)
            .await
            .map_err(|e| {
                warn!("ZIP lookup for {} failed: {}", zip, e);
                AppError::internal("Failed to fetch coordinates", json!({}))
            })?
            .ok_or_else(|| AppError::not_found("ZIP code not found", json!({})))?;

        self.cache.set(&key, coords.clone().into(), None).await;

        Ok(Lookup::fresh(coords))
    }

    /// Resolves raw `lat`/`lng` query values to a postal location.
    ///
    /// The cache key is built from the raw strings, so `40.7` and `40.70` are
    /// cached separately.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a value is missing, unparseable, or out of range
    ///   (see [`validation::parse_coordinates`])
    /// - [`AppError::NotFound`] (`Location not found`) if the provider returns no address
    /// - [`AppError::Internal`] (`Failed to fetch location`) on any upstream failure
    pub async fn location_for_coordinates(
        &self,
        lat: Option<&str>,
        lng: Option<&str>,
    ) -> Result<Lookup<Location>, AppError> {
        let coordinates = validation::parse_coordinates(lat, lng)?;

        let key = cache_key::coords(lat.unwrap_or_default(), lng.unwrap_or_default());

        if let Some(hit) = self.cached(&key, GeoPayload::into_location).await {
            return Ok(Lookup::hit(hit));
        }

        let _flight = self.flights.acquire(&key).await;

        if let Some(hit) = self.cached(&key, GeoPayload::into_location).await {
            debug!("Coalesced reverse lookup for {}", key);
            return Ok(Lookup::hit(hit));
        }

        let location = self
            .provider
            .reverse(coordinates.lat, coordinates.lng)
            .await
            .map_err(|e| {
                warn!("Reverse lookup for {} failed: {}", key, e);
                AppError::internal("Failed to fetch location", json!({}))
            })?
            .ok_or_else(|| AppError::not_found("Location not found", json!({})))?;

        self.cache.set(&key, location.clone().into(), None).await;

        Ok(Lookup::fresh(location))
    }

    async fn cached<T>(&self, key: &str, extract: fn(GeoPayload) -> Option<T>) -> Option<T> {
        self.cache.get(key).await.and_then(extract)
    }
}
