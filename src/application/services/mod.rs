//! Business logic services for the application layer.

pub mod geocoding_service;
pub mod single_flight;

pub use geocoding_service::{GeocodingService, Lookup};
pub use single_flight::SingleFlight;
