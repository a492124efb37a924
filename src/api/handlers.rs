//! HTTP request handlers for the Tip-Pool Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_percentage_pool_allocations;
use crate::error::EngineResult;
use crate::models::AllocationResult;

use super::request::AllocationRequest;
use super::response::{AllocationResponse, ApiError, ApiErrorResponse, PoolsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allocate", post(allocate_handler))
        .route("/pools", get(pools_handler))
        .with_state(state)
}

/// Handler for GET /pools endpoint.
///
/// Returns the restaurant's configured pools.
async fn pools_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    Json(PoolsResponse {
        restaurant_id: config.restaurant().id.clone(),
        pools: config.pools().to_vec(),
    })
}

/// Handler for POST /allocate endpoint.
///
/// Accepts one tip period's servers, workers and optional pools, and returns
/// the computed allocation.
async fn allocate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
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
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    match perform_allocation(&request, &state) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                period_start = %request.period.start_date,
                servers = request.servers.len(),
                workers = request.workers.len(),
                pools = result.pool_results.len(),
                split_items = result.split_items.len(),
                duration_us,
                "Allocation completed successfully"
            );
            let response = AllocationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                period: request.period,
                duration_us,
                result,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Allocation rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Validates the period and runs the engine over the request's inputs.
fn perform_allocation(
    request: &AllocationRequest,
    state: &AppState,
) -> EngineResult<AllocationResult> {
    request.period.validate()?;
    let pools = request.pools_or(state.config().pools());
    compute_percentage_pool_allocations(&request.servers, pools, &request.workers)
}
