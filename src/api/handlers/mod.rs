//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod coords;
pub mod health;
pub mod root;
pub mod zipcode;

pub use coords::coords_handler;
pub use health::health_handler;
pub use root::root_handler;
pub use zipcode::zipcode_handler;
