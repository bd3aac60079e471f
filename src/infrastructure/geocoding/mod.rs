//! Upstream geocoding clients.
//!
//! - [`NominatimClient`] - OpenStreetMap Nominatim search and reverse lookups

mod nominatim;

pub use nominatim::{DEFAULT_BASE_URL, NominatimClient};
