// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for remote calls, location lookups and routes

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every fallible collaborator call returns one of these.
/// The sync engine and catalog loader turn them into `OperationError`
/// state values; only route-level failures reach the HTTP layer.
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Place not found with id: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Message is shown to the user as-is, so no prefix
    #[error("{0}")]
    ExternalApiError(String),

    #[error("Invalid response payload: {0}")]
    ParseError(String),

    #[error("Location permission denied")]
    LocationDenied,

    #[error("Timed out after {0}s waiting for the current position")]
    LocationTimeout(u64),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PlacesError {
    fn error_code(&self) -> &'static str {
        match self {
            PlacesError::NotFound(_) => "NOT_FOUND",
            PlacesError::ValidationError(_) => "VALIDATION_ERROR",
            PlacesError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            PlacesError::ParseError(_) => "PARSE_ERROR",
            PlacesError::LocationDenied => "LOCATION_DENIED",
            PlacesError::LocationTimeout(_) => "LOCATION_TIMEOUT",
            PlacesError::LocationUnavailable(_) => "LOCATION_UNAVAILABLE",
            PlacesError::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PlacesError::ExternalApiError(_) | PlacesError::ParseError(_) => {
                StatusCode::BAD_GATEWAY
            }
            PlacesError::LocationDenied => StatusCode::FORBIDDEN,
            PlacesError::LocationTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            PlacesError::LocationUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PlacesError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PlacesError::NotFound("p1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlacesError::ValidationError("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::ExternalApiError("down".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            PlacesError::LocationTimeout(10).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_external_message_is_unprefixed() {
        let err = PlacesError::ExternalApiError("Failed to update user data.".into());
        assert_eq!(err.to_string(), "Failed to update user data.");
    }
}
