//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with cache occupancy.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "cache": {
///       "status": "ok",
///       "message": "memory: 42 live / 45 stored (capacity 10000)",
///       "stats": { "total_entries": 45, "expired_entries": 3, "valid_entries": 42, "capacity": 10000 }
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            cache: check_cache(&state).await,
        },
    })
}

/// Reports cache backend and occupancy.
async fn check_cache(state: &AppState) -> CheckStatus {
    let stats = state.cache.stats().await;

    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!(
            "{}: {} live / {} stored (capacity {})",
            state.cache.backend(),
            stats.valid_entries,
            stats.total_entries,
            stats.capacity
        )),
        stats: Some(stats),
    }
}
