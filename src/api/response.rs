//! Response types for the Tip-Pool Engine API.
//!
//! This module defines the success envelope, the error response structures,
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AllocationResult, ContributionPool, TipPeriod};

/// Response body for a successful `/allocate` call.
///
/// Request-specific metadata lives here rather than in [`AllocationResult`],
/// which stays identical for identical input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tip period the allocation covers.
    pub period: TipPeriod,
    /// The calculation duration in microseconds.
    pub duration_us: u64,
    /// The allocation itself.
    pub result: AllocationResult,
}

/// Response body for `GET /pools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolsResponse {
    /// The restaurant the pools are configured for.
    pub restaurant_id: String,
    /// The configured pools in application order.
    pub pools: Vec<ContributionPool>,
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

impl ApiErrorResponse {
    fn bad_request(code: &str, error: &EngineError, details: &str) -> Self {
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::with_details(code, error.to_string(), details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::PoolNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("POOL_NOT_FOUND", error.to_string()),
            },
            EngineError::InvalidServer { .. } => Self::bad_request(
                "INVALID_SERVER",
                &error,
                "The server earning data contains invalid information",
            ),
            EngineError::InvalidWorker { .. } => Self::bad_request(
                "INVALID_WORKER",
                &error,
                "The pool worker data contains invalid information",
            ),
            EngineError::InvalidPool { .. } => Self::bad_request(
                "INVALID_POOL",
                &error,
                "The pool definition contains invalid information",
            ),
            EngineError::InvalidPercentage { .. } | EngineError::CombinedPercentageExceeded { .. } => {
                Self::bad_request(
                    "INVALID_PERCENTAGE",
                    &error,
                    "Contribution percentages must be within 0-100 and total at most 100",
                )
            }
            EngineError::DuplicateId { .. } => Self::bad_request(
                "DUPLICATE_ID",
                &error,
                "Each server, worker and pool id may appear only once",
            ),
            EngineError::InvalidPeriod { .. } => Self::bad_request(
                "INVALID_PERIOD",
                &error,
                "The tip period end date must not be before its start date",
            ),
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    message.clone(),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_server_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidServer {
            employee_id: "srv_001".to_string(),
            field: "earned_amount_cents".to_string(),
            message: "must not be negative (got -1)".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SERVER");
        assert!(api_error.error.message.contains("srv_001"));
    }

    #[test]
    fn test_percentage_errors_share_a_code() {
        let single: ApiErrorResponse = EngineError::InvalidPercentage {
            pool_id: "dish".to_string(),
            value: Decimal::from(101),
        }
        .into();
        let combined: ApiErrorResponse = EngineError::CombinedPercentageExceeded {
            total: Decimal::from(110),
        }
        .into();

        assert_eq!(single.error.code, "INVALID_PERCENTAGE");
        assert_eq!(combined.error.code, "INVALID_PERCENTAGE");
    }

    #[test]
    fn test_pool_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::PoolNotFound {
            pool_id: "valet".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_calculation_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "split items total 1 does not match earned total 2".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CALCULATION_ERROR");
    }
}
