//! Request input validation for ZIP codes and coordinate pairs.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use validator::Validate;

use crate::error::AppError;

/// Exactly five ASCII digits. `\d` would also accept non-ASCII digits.
static ZIP_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

/// Example query returned with coordinate validation errors.
pub const COORDS_EXAMPLE: &str = "/coords?lat=40.7648&lng=-73.9808";

#[derive(Debug, Validate)]
struct ZipInput {
    #[validate(regex(path = *ZIP_CODE_REGEX))]
    zip: String,
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Checks that `zip` is a five-digit US ZIP code.
///
/// No trimming is applied: `" 10001"` is rejected.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with message `Invalid ZIP code`.
pub fn validate_zip(zip: &str) -> Result<(), AppError> {
    ZipInput {
        zip: zip.to_string(),
    }
    .validate()
    .map_err(|_| invalid_zip())
}

/// Parses and range-checks the raw `lat`/`lng` query values.
///
/// # Validation Order
///
/// 1. Absent, empty, or whitespace-only parameter: `Missing lat or lng query params`
/// 2. Not a finite number, or outside `[-90, 90]` / `[-180, 180]`: `Invalid coordinates`
///
/// # Errors
///
/// Returns [`AppError::Validation`] in both cases. The invalid-coordinates error
/// carries an `example` field with a well-formed query.
pub fn parse_coordinates(lat: Option<&str>, lng: Option<&str>) -> Result<Coordinates, AppError> {
    let (Some(lat), Some(lng)) = (non_blank(lat), non_blank(lng)) else {
        return Err(AppError::bad_request(
            "Missing lat or lng query params",
            json!({}),
        ));
    };

    let coordinates = match (parse_finite(lat), parse_finite(lng)) {
        (Some(lat), Some(lng)) => Coordinates { lat, lng },
        _ => return Err(invalid_coordinates()),
    };

    coordinates.validate().map_err(|_| invalid_coordinates())?;

    Ok(coordinates)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `Invalid ZIP code` (400).
pub fn invalid_zip() -> AppError {
    AppError::bad_request("Invalid ZIP code", json!({}))
}

/// `Invalid coordinates` (400) with a well-formed `example` query.
pub fn invalid_coordinates() -> AppError {
    AppError::bad_request(
        "Invalid coordinates",
        json!({ "example": COORDS_EXAMPLE }),
    )
}
