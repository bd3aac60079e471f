//! DTOs for the ZIP → coordinates endpoint.

use serde::Serialize;

use crate::application::services::Lookup;
use crate::domain::entities::ZipCoordinates;

/// Coordinates for a ZIP code, flagged when served from cache.
///
/// ```json
/// { "zip": "10001", "latitude": 40.7484, "longitude": -73.9967, "cached": true }
/// ```
#[derive(Debug, Serialize)]
pub struct ZipcodeResponse {
    #[serde(flatten)]
    pub coordinates: ZipCoordinates,

    /// Present (and `true`) only on cache hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

impl From<Lookup<ZipCoordinates>> for ZipcodeResponse {
    fn from(lookup: Lookup<ZipCoordinates>) -> Self {
        Self {
            coordinates: lookup.data,
            cached: lookup.cached.then_some(true),
        }
    }
}
