//! HTTP handlers
//!
//! The enrollment handler is the transport boundary: it decodes and validates
//! the payload, then hands a plain `(name, skill, latency)` to the engine.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use utoipa::OpenApi;

use super::openapi::ApiDoc;
use super::state::AppState;
use super::types::{
    ApiError, ApiResult, EnrollRequest, EnrollResponseData, HealthResponse, QueueStatusData,
    created, error_codes, ok,
};

/// Enroll a player
///
/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Player accepted", body = EnrollResponseData),
        (status = 400, description = "Malformed or invalid payload"),
        (status = 409, description = "Player already queued"),
        (status = 500, description = "Queue store failure")
    ),
    tag = "Matchmaking"
)]
pub async fn enroll_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> ApiResult<EnrollResponseData> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected enroll payload: {}", e.body_text());
        ApiError::bad_request("Invalid request")
    })?;
    req.validate().map_err(ApiError::bad_request)?;

    let group = state
        .engine
        .enroll(req.name.clone(), req.skill, req.latency)
        .await
        .map_err(|e| {
            if e.http_status() >= 500 {
                tracing::error!(name = %req.name, "Enroll failed: {}", e);
            }
            ApiError::from(e)
        })?;

    created(EnrollResponseData {
        queued: group.is_none(),
        group: group.map(|g| g.into_iter().map(|p| p.name).collect()),
        name: req.name,
    })
}

/// Queue status
///
/// GET /api/v1/queue
#[utoipa::path(
    get,
    path = "/api/v1/queue",
    responses(
        (status = 200, description = "Current queue size", body = QueueStatusData),
        (status = 500, description = "Queue store failure")
    ),
    tag = "Matchmaking"
)]
pub async fn queue_status(State(state): State<Arc<AppState>>) -> ApiResult<QueueStatusData> {
    let queued = state.engine.queued_count().await?;
    ok(QueueStatusData {
        queued,
        group_size: state.engine.group_size(),
    })
}

/// Health check
///
/// Probes the queue store through the engine; does not expose the cause.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    if let Err(e) = state.engine.queued_count().await {
        tracing::error!("[HEALTH] Queue store probe failed: {}", e);
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            "unavailable",
        ));
    }
    ok(HealthResponse {
        timestamp_ms: Utc::now().timestamp_millis(),
    })
}

/// OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
