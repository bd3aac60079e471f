//! Cache key construction.
//!
//! Keys are namespaced so both lookup directions can share one store. Coordinate
//! keys use the raw query strings: `40.7` and `40.70` are different keys.

pub const ZIP_PREFIX: &str = "zip:";
pub const COORDS_PREFIX: &str = "coords:";

/// Key for a ZIP → coordinates lookup.
pub fn zip(zip: &str) -> String {
    format!("{}{}", ZIP_PREFIX, zip)
}

/// Key for a coordinates → ZIP lookup.
pub fn coords(lat: &str, lng: &str) -> String {
    format!("{}{},{}", COORDS_PREFIX, lat, lng)
}
