//! Application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON error body: `{ "error": "<message>", ...details }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    /// Builds the response body. Non-object details are dropped.
    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Internal { details, .. } => details,
        };

        ErrorBody {
            error: self.message().to_string(),
            details: match details {
                Value::Object(map) => map.clone(),
                _ => Map::new(),
            },
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.status())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_flattens_details() {
        let err = AppError::bad_request("Invalid coordinates", json!({"example": "/coords"}));
        let body = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(
            body,
            json!({"error": "Invalid coordinates", "example": "/coords"})
        );
    }

    #[test]
    fn test_body_without_details() {
        let err = AppError::not_found("ZIP code not found", json!({}));
        let body = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(body, json!({"error": "ZIP code not found"}));
    }

    #[test]
    fn test_non_object_details_are_dropped() {
        let err = AppError::internal("boom", json!("not an object"));
        let body = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(body, json!({"error": "boom"}));
    }
}
