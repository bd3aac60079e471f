//! Handler for coordinates → ZIP lookups.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::coords::{CoordsQuery, CoordsResponse};
use crate::domain::validation::invalid_coordinates;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a latitude/longitude pair to a ZIP code, city, and state.
///
/// # Endpoint
///
/// `GET /coords?lat={lat}&lng={lng}`
///
/// # Response
///
/// ```json
/// { "zip": "10019", "city": "New York", "state": "New York", "state_code": "NY" }
/// ```
///
/// # Errors
///
/// - 400 `{"error": "Missing lat or lng query params"}` if either is absent or blank
/// - 400 `{"error": "Invalid coordinates", "example": "..."}` if unparseable or out of range,
///   or if the query string itself is malformed (e.g. a repeated `lat`)
/// - 404 `{"error": "Location not found"}` if the upstream has no address for the point
/// - 500 `{"error": "Failed to fetch location"}` on upstream failure
pub async fn coords_handler(
    query: Result<Query<CoordsQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<CoordsResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Rejected coords query: {}", rejection.body_text());
        invalid_coordinates()
    })?;

    let lookup = state
        .geocoding_service
        .location_for_coordinates(query.lat.as_deref(), query.lng.as_deref())
        .await?;

    Ok(Json(lookup.data.into()))
}
