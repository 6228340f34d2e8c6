//! Daily report model and DTOs. A denormalized projection over
//! `activity_logs`; recomputed from scratch, never patched incrementally.

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::types::{Date, DbId, Timestamp};

/// A row from the `daily_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyReport {
    pub id: DbId,
    pub account_id: DbId,
    /// The most recently completed session that contributed to this row.
    pub work_session_id: DbId,
    pub report_date: Date,
    pub total_work_time: i64,
    pub productive_time: i64,
    pub idle_time: i64,
    pub violation_count: i64,
    /// Domain -> combined active+idle seconds, top entries only.
    pub top_domains: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DailyReport {
    /// Share of productive time in the total, as a percentage.
    pub fn productivity_percentage(&self) -> f64 {
        if self.total_work_time == 0 {
            return 0.0;
        }
        (self.productive_time as f64 / self.total_work_time as f64) * 100.0
    }
}

/// DTO for writing a recomputed report.
#[derive(Debug, Clone)]
pub struct UpsertDailyReport {
    pub account_id: DbId,
    pub work_session_id: DbId,
    pub report_date: Date,
    pub total_work_time: i64,
    pub productive_time: i64,
    pub idle_time: i64,
    pub violation_count: i64,
    pub top_domains: serde_json::Value,
}
