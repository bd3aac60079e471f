//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Input validation
//! lives in [`crate::domain::validation`].

pub mod coords;
pub mod health;
pub mod zipcode;
