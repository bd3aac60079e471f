//! Handler for ZIP → coordinates lookups.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::api::dto::zipcode::ZipcodeResponse;
use crate::domain::validation::invalid_zip;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a five-digit US ZIP code to coordinates.
///
/// # Endpoint
///
/// `GET /zipcode/{zip}`
///
/// # Response
///
/// ```json
/// { "zip": "10001", "latitude": 40.7484, "longitude": -73.9967 }
/// ```
///
/// Cache hits carry an extra `"cached": true`.
///
/// # Errors
///
/// - 400 `{"error": "Invalid ZIP code"}` if `zip` is not five ASCII digits or not valid UTF-8
/// - 404 `{"error": "ZIP code not found"}` if the upstream has no match
/// - 500 `{"error": "Failed to fetch coordinates"}` on upstream failure
pub async fn zipcode_handler(
    zip: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<ZipcodeResponse>, AppError> {
    let Path(zip) = zip.map_err(|rejection| {
        tracing::debug!("Rejected zip path: {}", rejection.body_text());
        invalid_zip()
    })?;

    let lookup = state.geocoding_service.coordinates_for_zip(&zip).await?;

    Ok(Json(lookup.into()))
}
