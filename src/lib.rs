//! # ZIP Coords
//!
//! A small HTTP service translating US ZIP codes to coordinates and back,
//! backed by OpenStreetMap Nominatim and an in-memory TTL cache.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, input validation, provider trait
//! - **Application Layer** ([`application`]) - Lookup flow with caching and request coalescing
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory cache and Nominatim client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `GET /zipcode/{zip}` - `{ zip, latitude, longitude[, cached] }`
//! - `GET /coords?lat=..&lng=..` - `{ zip, city, state, state_code }`
//! - `GET /health` - Cache occupancy
//!
//! ## Quick Start
//!
//! ```bash
//! export PORT=8080
//! cargo run
//! curl localhost:8080/zipcode/10001
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{GeocodingService, Lookup};
    pub use crate::domain::entities::{GeoPayload, Location, ZipCoordinates};
    pub use crate::domain::providers::{GeocodingError, GeocodingProvider};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, InMemoryCache, NullCache};
    pub use crate::state::AppState;
}
