//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for caching and upstream geocoding.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (in-memory and no-op implementations)
//! - [`geocoding`] - Nominatim HTTP client

pub mod cache;
pub mod geocoding;
