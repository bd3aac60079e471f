//! Domain entities.

mod geo;

pub use geo::{GeoPayload, Location, ZipCoordinates};
