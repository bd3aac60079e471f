//! Application layer services implementing the lookup flow.
//!
//! This layer orchestrates validation, caching, and upstream calls. Services
//! consume the provider trait and the cache service and expose a small API for
//! HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::geocoding_service::GeocodingService`] - ZIP ↔ coordinates lookups

pub mod services;
