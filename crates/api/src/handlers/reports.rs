//! Daily report reads and the maintenance rebuild endpoint.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use worktrack_core::types::{Date, DbId, Timestamp};
use worktrack_db::models::daily_report::DailyReport;
use worktrack_db::repositories::DailyReportRepo;

use crate::engine::aggregation;
use crate::error::{AppResult, Json};
use crate::middleware::auth::AuthAccount;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DailyReportQuery {
    #[serde(default)]
    pub date: Option<Date>,
}

/// A daily report enriched with its derived productivity percentage.
#[derive(Debug, Serialize)]
pub struct DailyReportView {
    pub id: DbId,
    pub account_id: DbId,
    pub work_session_id: DbId,
    pub report_date: Date,
    pub total_work_time: i64,
    pub productive_time: i64,
    pub idle_time: i64,
    pub violation_count: i64,
    pub productivity_percentage: f64,
    pub top_domains: serde_json::Value,
    pub updated_at: Timestamp,
}

impl From<DailyReport> for DailyReportView {
    fn from(report: DailyReport) -> Self {
        let productivity_percentage = report.productivity_percentage();
        DailyReportView {
            id: report.id,
            account_id: report.account_id,
            work_session_id: report.work_session_id,
            report_date: report.report_date,
            total_work_time: report.total_work_time,
            productive_time: report.productive_time,
            idle_time: report.idle_time,
            violation_count: report.violation_count,
            productivity_percentage,
            top_domains: report.top_domains,
            updated_at: report.updated_at,
        }
    }
}

/// GET /api/v1/reports/daily?date=YYYY-MM-DD
///
/// Fetch the authenticated account's daily reports. Defaults to today.
/// An account with no report for the date gets an empty list, not 404.
pub async fn list_daily(
    auth: AuthAccount,
    State(state): State<AppState>,
    Query(query): Query<DailyReportQuery>,
) -> AppResult<impl IntoResponse> {
    let date = query
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let reports: Vec<DailyReportView> =
        DailyReportRepo::find_by_account_date(&state.pool, auth.account_id, date)
            .await?
            .map(DailyReportView::from)
            .into_iter()
            .collect();

    Ok(Json(reports))
}

#[derive(Debug, Deserialize)]
pub struct RebuildRequest {
    #[serde(default)]
    pub account_id: Option<DbId>,
    #[serde(default)]
    pub date: Option<Date>,
}

/// POST /api/v1/reports/daily/rebuild
///
/// Regenerate daily reports from activity logs for every completed
/// session matching the filters. Maintenance endpoint for reconciling
/// drift or backfilling after an allow-list change.
pub async fn rebuild(
    auth: AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<RebuildRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(
        requested_by = auth.account_id,
        account_id = input.account_id,
        date = ?input.date,
        "Daily report rebuild requested"
    );

    let outcome = aggregation::rebuild_reports(&state.pool, input.account_id, input.date).await?;
    Ok(Json(outcome))
}
