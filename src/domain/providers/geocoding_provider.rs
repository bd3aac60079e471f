//! Geocoding provider trait and error type.

use async_trait::async_trait;

use crate::domain::entities::{Location, ZipCoordinates};

/// Errors raised while talking to an upstream geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    /// Transport failure, timeout, or non-2xx status.
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body was not the expected JSON shape.
    #[error("Failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Translates between US ZIP codes and coordinates.
///
/// # Implementations
///
/// - [`crate::infrastructure::geocoding::NominatimClient`] - OpenStreetMap Nominatim
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Looks up the coordinates of a US ZIP code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(coords))` built from the first upstream match
    /// - `Ok(None)` if the provider has no match
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError`] on transport or decoding failures.
    async fn search_postcode(&self, zip: &str) -> Result<Option<ZipCoordinates>, GeocodingError>;

    /// Resolves the postal location at a coordinate pair.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(location))` when the provider returns an address
    /// - `Ok(None)` when it cannot geocode the point
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError`] on transport or decoding failures.
    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<Location>, GeocodingError>;
}
