//! Response types for the tariff rate engine API.
//!
//! This module defines the success body of `/price`, the error body, and
//! the mapping from [`EngineError`] to HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ErrorKind};
use crate::models::{Cents, DisplayParam, PriceResult, ServiceCode};

/// Response body for a successful `/price` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResponse {
    /// The payment service item that was priced.
    pub payment_service_item_id: Uuid,
    /// The tariff line item code.
    pub service_code: ServiceCode,
    /// The final price in cents.
    pub price_cents: Cents,
    /// The audit parameters behind the price.
    pub display_params: Vec<DisplayParam>,
}

impl PriceResponse {
    /// Wraps a pricing result.
    pub fn new(payment_service_item_id: Uuid, service_code: ServiceCode, result: PriceResult) -> Self {
        Self {
            payment_service_item_id,
            service_code,
            price_cents: result.price,
            display_params: result.display_params,
        }
    }
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

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match error.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::TypeMismatch => (StatusCode::BAD_REQUEST, "TYPE_MISMATCH"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::NotImplemented => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
            ErrorKind::Configuration => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            ErrorKind::Calculation => (StatusCode::INTERNAL_SERVER_ERROR, "CALCULATION_ERROR"),
        };

        let error = match &error {
            EngineError::NotFound { entity, message } => {
                ApiError::with_details(code, message.clone(), format!("No matching {}", entity))
            }
            EngineError::AmbiguousMatch { entity, .. } => ApiError::with_details(
                code,
                error.to_string(),
                format!("The {} lookup matched more than one row", entity),
            ),
            _ => ApiError::new(code, error.to_string()),
        };

        ApiErrorResponse { status, error }
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
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response: ApiErrorResponse =
            EngineError::validation("ContractCode", "is required").into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(response.error.message, "Invalid ContractCode: is required");
    }

    #[test]
    fn test_status_per_error_kind() {
        let cases = [
            (
                EngineError::TypeMismatch {
                    key: "WeightBilled".to_string(),
                    expected: "integer".to_string(),
                    actual: "string".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                EngineError::not_found("param", "could not find param with key WeightBilled"),
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::AmbiguousMatch {
                    entity: "contract year".to_string(),
                    key: "TEST".to_string(),
                    count: 2,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::NotImplemented {
                    service_code: "IHPK".to_string(),
                },
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                EngineError::CalculationError {
                    message: "overflow".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
        }
    }

    #[test]
    fn test_not_found_carries_details() {
        let response: ApiErrorResponse =
            EngineError::not_found("param", "could not find param with key WeightBilled").into();
        assert_eq!(response.error.details.as_deref(), Some("No matching param"));
    }
}
