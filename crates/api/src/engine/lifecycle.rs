//! Session lifecycle: reaction to check-in/check-out events emitted by
//! the external attendance system.

use serde::Deserialize;
use sqlx::PgPool;
use worktrack_core::error::CoreError;
use worktrack_core::types::{Date, DbId, Timestamp};
use worktrack_db::models::daily_report::DailyReport;
use worktrack_db::models::work_session::{CreateWorkSession, WorkSession};
use worktrack_db::repositories::{AccountRepo, WorkSessionRepo};

use crate::engine::{aggregation, token};
use crate::error::{AppError, AppResult};

/// A check-in event from the attendance system.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInEvent {
    pub attendance_activity_id: DbId,
    pub account_id: DbId,
    pub attendance_date: Date,
    /// Clock-in timestamp; the session starts now when absent.
    #[serde(default)]
    pub clock_in: Option<Timestamp>,
}

/// Open a work session for a check-in event.
///
/// Idempotent per attendance activity: a duplicate check-in signal for
/// an activity that already has an active session returns that session
/// unchanged. The exactly-once guarantee rests on the partial unique
/// index, not on the existence check.
pub async fn on_check_in(pool: &PgPool, event: &CheckInEvent) -> AppResult<WorkSession> {
    let account = AccountRepo::find_by_id(pool, event.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "account",
            id: event.account_id,
        }))?;

    let now = chrono::Utc::now();
    let input = CreateWorkSession {
        account_id: account.id,
        attendance_activity_id: Some(event.attendance_activity_id),
        attendance_date: event.attendance_date,
        session_start: event.clock_in.unwrap_or(now),
        session_token: token::generate_session_token(),
        token_expiry: now + chrono::Duration::hours(token::TOKEN_TTL_HOURS),
    };

    if let Some(session) = WorkSessionRepo::create_active(pool, &input).await? {
        tracing::info!(
            session_id = session.id,
            account_id = session.account_id,
            attendance_activity_id = event.attendance_activity_id,
            "Work session opened on check-in"
        );
        return Ok(session);
    }

    // Insert conflicted: an active session already references this
    // attendance activity (duplicate signal or concurrent check-in).
    WorkSessionRepo::find_active_by_attendance(pool, event.attendance_activity_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "check-in conflict for attendance activity {} but no active session found",
                event.attendance_activity_id
            ))
        })
}

/// Close the active session referencing an attendance activity.
///
/// A check-out for an activity this service never observed is not an
/// error; `None` is returned and nothing changes. On success the
/// session's counters are reconciled from the activity log and the
/// daily report is regenerated before returning.
pub async fn on_check_out(
    pool: &PgPool,
    attendance_activity_id: DbId,
    clock_out: Option<Timestamp>,
) -> AppResult<Option<(WorkSession, DailyReport)>> {
    let Some(session) =
        WorkSessionRepo::find_active_by_attendance(pool, attendance_activity_id).await?
    else {
        tracing::debug!(
            attendance_activity_id,
            "Check-out without a tracked session, ignoring"
        );
        return Ok(None);
    };

    let session_end = clock_out.unwrap_or_else(chrono::Utc::now);
    let Some(sealed) = WorkSessionRepo::complete(pool, session.id, session_end).await? else {
        // Another check-out signal sealed it first.
        return Ok(None);
    };

    let (total_active, total_idle) = aggregation::reconcile_totals(pool, sealed.id).await?;
    let report = aggregation::generate_report(pool, &sealed).await?;

    tracing::info!(
        session_id = sealed.id,
        total_active,
        total_idle,
        report_id = report.id,
        "Work session completed on check-out"
    );

    // Re-read so the returned session carries the reconciled totals.
    let session = WorkSessionRepo::find_by_id(pool, sealed.id)
        .await?
        .unwrap_or(sealed);

    Ok(Some((session, report)))
}
