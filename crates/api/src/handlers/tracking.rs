//! Ingestion handlers for the browser extension.
//!
//! These endpoints carry the session token in the request body rather
//! than a header, matching what the extension sends. Every failure to
//! match a live session is the uniform 401.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::engine::ingestion::{self, ActivityEntry, HeartbeatStatus};
use crate::error::{AppError, AppResult, Json};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HeartbeatRequest {
    pub token: String,
    #[serde(default)]
    pub domain_name: Option<String>,
    pub status: HeartbeatStatus,
}

/// POST /api/v1/tracking/heartbeat
///
/// Record a liveness ping. Never affects session totals.
pub async fn heartbeat(
    State(state): State<AppState>,
    Json(input): Json<HeartbeatRequest>,
) -> AppResult<impl IntoResponse> {
    ingestion::record_heartbeat(&state.pool, &input.token, input.domain_name, input.status).await?;
    Ok(Json(serde_json::json!({ "status": "success" })))
}

#[derive(Debug, Deserialize)]
pub struct ActivityLogRequest {
    pub token: String,
    #[serde(flatten)]
    pub entry: ActivityEntry,
}

/// POST /api/v1/tracking/activity
///
/// Record a single activity interval. The stored row carries the
/// server-computed allowed flag and resolved interval bounds.
pub async fn activity_log(
    State(state): State<AppState>,
    Json(input): Json<ActivityLogRequest>,
) -> AppResult<impl IntoResponse> {
    ingestion::record_activity(&state.pool, &input.token, &input.entry).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "status": "success" })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ActivityBatchRequest {
    pub token: String,
    pub logs: Vec<ActivityEntry>,
}

#[derive(Debug, Serialize)]
pub struct ActivityBatchResponse {
    pub status: &'static str,
    pub created: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// POST /api/v1/tracking/activity/batch
///
/// Record a batch of intervals in one round trip. Individual entry
/// failures are reported per entry and never fail the batch; an empty
/// batch is rejected outright.
pub async fn activity_log_batch(
    State(state): State<AppState>,
    Json(input): Json<ActivityBatchRequest>,
) -> AppResult<impl IntoResponse> {
    if input.logs.is_empty() {
        return Err(AppError::BadRequest("logs must not be empty".into()));
    }

    let outcome =
        ingestion::record_activity_batch(&state.pool, &input.token, &input.logs).await?;

    let status = if outcome.errors.is_empty() {
        "success"
    } else {
        "partial"
    };

    Ok((
        StatusCode::CREATED,
        Json(ActivityBatchResponse {
            status,
            created: outcome.created,
            total: outcome.total,
            errors: outcome.errors,
        }),
    ))
}
