//! HTTP request handlers for the tariff rate engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::PriceRequest;
use super::response::{ApiError, ApiErrorResponse, PriceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/price", post(price_handler))
        .route("/service-codes", get(service_codes_handler))
        .route("/audit/:payment_service_item_id", get(audit_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /price.
///
/// Prices one payment service item and returns the price with its display
/// parameters.
async fn price_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing price request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let start_time = Instant::now();
    match state.dispatcher().price(
        request.payment_service_item_id,
        &request.service_code,
        &request.params,
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                service_code = %request.service_code,
                price_cents = result.price.0,
                duration_us = start_time.elapsed().as_micros(),
                "Pricing completed successfully"
            );
            json_response(
                StatusCode::OK,
                PriceResponse::new(
                    request.payment_service_item_id,
                    request.service_code,
                    result,
                ),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                service_code = %request.service_code,
                error = %err,
                "Pricing failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for GET /service-codes.
async fn service_codes_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.dispatcher().supported_codes())
}

/// Handler for GET /audit/:payment_service_item_id.
///
/// Returns every display parameter set recorded for the item, oldest first.
async fn audit_handler(
    State(state): State<AppState>,
    Path(payment_service_item_id): Path<Uuid>,
) -> Response {
    json_response(
        StatusCode::OK,
        state.audit().records_for(payment_service_item_id),
    )
}
