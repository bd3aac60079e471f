//! API route configuration.

use crate::api::handlers::{coords_handler, zipcode_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Lookup routes. All are public.
///
/// # Endpoints
///
/// - `GET /zipcode/{zip}` - ZIP code to coordinates
/// - `GET /coords`        - Coordinates (`lat`, `lng` query) to ZIP code
pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/zipcode/{zip}", get(zipcode_handler))
        .route("/coords", get(coords_handler))
}
