//! Domain layer: geocoding entities, request validation, and provider contracts.
//!
//! # Architecture
//!
//! - [`entities`] - ZIP and location data structures shared by the cache and the API
//! - [`validation`] - ZIP and coordinate input checks
//! - [`cache_key`] - Namespaced cache key construction
//! - [`providers`] - Upstream geocoding provider trait
//!
//! The domain layer has no knowledge of HTTP clients or cache backends; those
//! live in [`crate::infrastructure`].

pub mod cache_key;
pub mod entities;
pub mod providers;
pub mod validation;
