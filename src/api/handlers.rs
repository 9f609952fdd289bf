//! HTTP request handlers for the rota engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::rota::build_day_view;

use super::request::DayViewRequest;
use super::response::{ApiError, DayViewResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rota/day", post(day_view_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health endpoint.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "poll_interval_secs": state.settings().poll_interval_secs,
    }))
}

/// Handler for POST /rota/day endpoint.
///
/// Accepts a rota snapshot and returns the computed day view.
async fn day_view_handler(
    State(_state): State<AppState>,
    payload: Result<Json<DayViewRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day view request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
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

    let reference = request.reference_time.unwrap_or_else(Utc::now);

    let start_time = Instant::now();
    let view = build_day_view(
        &request.shifts,
        &request.staff,
        &request.filters,
        request.date,
        reference,
    );
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        shifts_in = request.shifts.len(),
        shifts_out = view.shifts.len(),
        groups = view.groups.len(),
        duration_us = duration.as_micros(),
        "Day view computed"
    );

    let response = DayViewResponse {
        date: request.date,
        generated_at: Utc::now(),
        view,
    };
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
