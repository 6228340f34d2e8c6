//! Attendance event intake: the bridge from the external attendance
//! system into session lifecycle.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use worktrack_core::error::CoreError;
use worktrack_core::types::{DbId, Timestamp};
use worktrack_db::models::daily_report::DailyReport;
use worktrack_db::models::work_session::WorkSession;
use worktrack_db::repositories::WorkSessionRepo;

use crate::engine::lifecycle::{self, CheckInEvent};
use crate::error::{AppError, AppResult, Json};
use crate::middleware::auth::AuthAccount;
use crate::state::AppState;

/// POST /api/v1/attendance/check-in
///
/// Open a work session for the authenticated account. Duplicate signals
/// for the same attendance activity return the already-open session.
pub async fn check_in(
    auth: AuthAccount,
    State(state): State<AppState>,
    Json(event): Json<CheckInEvent>,
) -> AppResult<impl IntoResponse> {
    if event.account_id != auth.account_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot check in on behalf of another account".into(),
        )));
    }

    let session = lifecycle::on_check_in(&state.pool, &event).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[derive(Debug, Deserialize)]
pub struct CheckOutRequest {
    pub attendance_activity_id: DbId,
    #[serde(default)]
    pub clock_out: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
pub struct CheckOutResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<WorkSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DailyReport>,
}

/// POST /api/v1/attendance/check-out
///
/// Seal the active session for an attendance activity, reconcile its
/// totals from the activity log, and regenerate the daily report. A
/// check-out for an activity with no tracked session is acknowledged
/// without effect.
pub async fn check_out(
    auth: AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CheckOutRequest>,
) -> AppResult<impl IntoResponse> {
    // Ownership check before sealing anything.
    if let Some(session) =
        WorkSessionRepo::find_active_by_attendance(&state.pool, input.attendance_activity_id)
            .await?
    {
        if session.account_id != auth.account_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot check out another account's session".into(),
            )));
        }
    }

    let completed =
        lifecycle::on_check_out(&state.pool, input.attendance_activity_id, input.clock_out)
            .await?;

    match completed {
        Some((session, report)) => Ok(Json(CheckOutResponse {
            status: "completed",
            session: Some(session),
            report: Some(report),
        })),
        None => Ok(Json(CheckOutResponse {
            status: "ignored",
            session: None,
            report: None,
        })),
    }
}
