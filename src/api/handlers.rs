//! HTTP request handlers for the statutory deduction engine API.
//!
//! This module contains the handler functions for the calculation
//! endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{OffCycleCalculationRequest, RegularCalculationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate/off-cycle", post(off_cycle_handler))
        .route("/calculate/regular", post(regular_handler))
        .with_state(state)
}

fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
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
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /calculate/off-cycle.
async fn off_cycle_handler(
    State(state): State<AppState>,
    payload: Result<Json<OffCycleCalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing off-cycle calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_to_error(rejection, correlation_id);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.engine().calculate_off_cycle(request.into()).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Off-cycle calculation failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for POST /calculate/regular.
async fn regular_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegularCalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing regular calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_to_error(rejection, correlation_id);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.engine().calculate_regular(request.into()).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Regular calculation failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}
