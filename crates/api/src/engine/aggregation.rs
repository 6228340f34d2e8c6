//! Checkout reconciliation and the daily report projection.
//!
//! The daily report is a cache over `activity_logs`; it is recomputed
//! from scratch on every write and can be rebuilt on demand for
//! reconciliation or backfill.

use serde::Serialize;
use sqlx::PgPool;
use worktrack_core::report::{summarize, ActivitySample};
use worktrack_core::types::{Date, DbId};
use worktrack_db::models::activity_log::ActivityLog;
use worktrack_db::models::daily_report::{DailyReport, UpsertDailyReport};
use worktrack_db::models::work_session::WorkSession;
use worktrack_db::repositories::{ActivityLogRepo, DailyReportRepo, WorkSessionRepo};

use crate::error::AppResult;

/// Overwrite a session's running counters with the authoritative sums
/// over its activity log rows, discarding any fast-path drift.
///
/// Returns the `(active, idle)` sums that were installed.
pub async fn reconcile_totals(pool: &PgPool, session_id: DbId) -> AppResult<(i64, i64)> {
    let (total_active, total_idle) = ActivityLogRepo::sum_for_session(pool, session_id).await?;
    WorkSessionRepo::overwrite_totals(pool, session_id, total_active, total_idle).await?;
    Ok((total_active, total_idle))
}

/// Recompute the daily report for the session's `(account, date)` key.
///
/// The projection folds over the activity rows of **all** sessions for
/// that account and date, so a second check-in/check-out cycle on the
/// same day adds to the report instead of erasing the first cycle's
/// contribution. The report's session link is repointed at the session
/// passed in. Idempotent for unchanged activity data.
pub async fn generate_report(pool: &PgPool, session: &WorkSession) -> AppResult<DailyReport> {
    let logs =
        ActivityLogRepo::list_for_account_date(pool, session.account_id, session.attendance_date)
            .await?;
    let summary = summarize(&to_samples(&logs));

    let report = DailyReportRepo::upsert(
        pool,
        &UpsertDailyReport {
            account_id: session.account_id,
            work_session_id: session.id,
            report_date: session.attendance_date,
            total_work_time: summary.total_work_time,
            productive_time: summary.productive_time,
            idle_time: summary.idle_time,
            violation_count: summary.violation_count,
            top_domains: summary.top_domains_json(),
        },
    )
    .await?;

    tracing::info!(
        report_id = report.id,
        account_id = report.account_id,
        report_date = %report.report_date,
        total_work_time = report.total_work_time,
        violation_count = report.violation_count,
        "Daily report generated"
    );
    Ok(report)
}

/// Result of a maintenance rebuild run.
#[derive(Debug, Serialize)]
pub struct RebuildOutcome {
    pub recalculated: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

/// Regenerate daily reports from activity logs for every completed
/// session matching the filters. Fixes any drift in the denormalized
/// rollups; safe to re-run at any time.
pub async fn rebuild_reports(
    pool: &PgPool,
    account_id: Option<DbId>,
    date: Option<Date>,
) -> AppResult<RebuildOutcome> {
    let sessions = WorkSessionRepo::list_completed(pool, account_id, date).await?;
    let total = sessions.len();

    let mut recalculated = 0;
    let mut errors = Vec::new();

    for session in &sessions {
        match generate_report(pool, session).await {
            Ok(_) => recalculated += 1,
            Err(err) => {
                tracing::error!(
                    session_id = session.id,
                    error = %err,
                    "Failed to rebuild daily report"
                );
                errors.push(format!(
                    "session {} ({}): {err}",
                    session.id, session.attendance_date
                ));
            }
        }
    }

    tracing::info!(recalculated, total, "Daily report rebuild complete");
    Ok(RebuildOutcome {
        recalculated,
        total,
        errors,
    })
}

fn to_samples(logs: &[ActivityLog]) -> Vec<ActivitySample> {
    logs.iter()
        .map(|log| ActivitySample {
            domain_name: log.domain_name.clone(),
            active_seconds: log.active_seconds,
            idle_seconds: log.idle_seconds,
            is_allowed: log.is_allowed,
        })
        .collect()
}
