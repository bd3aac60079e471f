//! Contracts for upstream geocoding providers.
//!
//! Implemented by the infrastructure layer, see
//! [`crate::infrastructure::geocoding::NominatimClient`].

pub mod geocoding_provider;

pub use geocoding_provider::{GeocodingError, GeocodingProvider};

#[cfg(test)]
pub use geocoding_provider::MockGeocodingProvider;
