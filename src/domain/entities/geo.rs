//! ZIP and location entities.

use serde::{Deserialize, Serialize};

/// Coordinates resolved for a US ZIP code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipCoordinates {
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ZipCoordinates {
    pub fn new(zip: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            zip: zip.into(),
            latitude,
            longitude,
        }
    }
}

/// Postal location resolved for a coordinate pair.
///
/// Every field is optional because the upstream address may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub zip: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
}

/// Value stored in the shared lookup cache.
///
/// Both namespaces (`zip:` and `coords:`) live in the same store, so the
/// payload carries which shape it holds.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoPayload {
    Zip(ZipCoordinates),
    Coords(Location),
}

impl GeoPayload {
    pub fn into_zip(self) -> Option<ZipCoordinates> {
        match self {
            GeoPayload::Zip(data) => Some(data),
            GeoPayload::Coords(_) => None,
        }
    }

    pub fn into_location(self) -> Option<Location> {
        match self {
            GeoPayload::Coords(data) => Some(data),
            GeoPayload::Zip(_) => None,
        }
    }
}

impl From<ZipCoordinates> for GeoPayload {
    fn from(value: ZipCoordinates) -> Self {
        GeoPayload::Zip(value)
    }
}

impl From<Location> for GeoPayload {
    fn from(value: Location) -> Self {
        GeoPayload::Coords(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accessors() {
        let zip = GeoPayload::from(ZipCoordinates::new("10001", 40.75, -73.99));
        assert!(zip.clone().into_location().is_none());
        assert_eq!(zip.into_zip().unwrap().zip, "10001");

        let loc = GeoPayload::from(Location {
            zip: Some("10019".to_string()),
            ..Location::default()
        });
        assert!(loc.clone().into_zip().is_none());
        assert_eq!(loc.into_location().unwrap().zip.as_deref(), Some("10019"));
    }

    #[test]
    fn test_location_serializes_missing_fields_as_null() {
        let json = serde_json::to_value(Location::default()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"zip": null, "city": null, "state": null, "state_code": null})
        );
    }
}
