//! DTOs for the coordinates → ZIP endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Location;

/// Raw query parameters. Kept as strings so validation can tell a missing
/// value from a malformed one, and so cache keys use the exact input.
#[derive(Debug, Default, Deserialize)]
pub struct CoordsQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Postal location for a coordinate pair. Unknown fields are `null`.
#[derive(Debug, Serialize)]
pub struct CoordsResponse {
    pub zip: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
}

impl From<Location> for CoordsResponse {
    fn from(location: Location) -> Self {
        Self {
            zip: location.zip,
            city: location.city,
            state: location.state,
            state_code: location.state_code,
        }
    }
}
