//! Response types for the rota engine API.
//!
//! This module defines the success envelope for day-view computations and
//! the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RotaError;
use crate::rota::DayView;

/// Response body for `POST /rota/day`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayViewResponse {
    /// The rota day the view was computed for.
    pub date: NaiveDate,
    /// When the server produced this view.
    pub generated_at: DateTime<Utc>,
    /// The computed view: filtered shifts, groups, stats, and attendance.
    #[serde(flatten)]
    pub view: DayView,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<RotaError> for ApiErrorResponse {
    fn from(error: RotaError) -> Self {
        match error {
            RotaError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            RotaError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            RotaError::Transport { message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "UPSTREAM_UNAVAILABLE",
                    "Data provider could not be reached",
                    message,
                ),
            },
            RotaError::Unauthorized { message } => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::with_details(
                    "UPSTREAM_UNAUTHORIZED",
                    "Data provider rejected the credentials",
                    message,
                ),
            },
            RotaError::RefreshAlreadyRunning => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "REFRESH_ALREADY_RUNNING",
                    "The refresh coordinator is already running",
                ),
            },
            RotaError::RefreshNotRunning => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "REFRESH_NOT_RUNNING",
                    "The refresh coordinator is not running",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_transport_error_maps_to_bad_gateway() {
        let rota_error = RotaError::Transport {
            message: "connection refused".to_string(),
        };
        let api_error: ApiErrorResponse = rota_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api_error.error.code, "UPSTREAM_UNAVAILABLE");
    }

    #[test]
    fn test_unauthorized_error_maps_to_401() {
        let rota_error = RotaError::Unauthorized {
            message: "token expired".to_string(),
        };
        let api_error: ApiErrorResponse = rota_error.into();
        assert_eq!(api_error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api_error.error.code, "UPSTREAM_UNAUTHORIZED");
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let rota_error = RotaError::ConfigNotFound {
            path: "/etc/rota.yaml".to_string(),
        };
        let api_error: ApiErrorResponse = rota_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
