//! Handler for the service banner.

use axum::Json;

/// Greeting returned by `GET /`.
pub const WELCOME_MESSAGE: &str =
    "Welcome zip-to-coords API for United States zip codes from 1-99950";

/// Returns the welcome banner as a JSON string.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<&'static str> {
    Json(WELCOME_MESSAGE)
}
