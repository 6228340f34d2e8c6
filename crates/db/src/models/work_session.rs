//! Work session model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::types::{Date, DbId, Timestamp};

/// Session is live and accepting activity.
pub const STATUS_ACTIVE: &str = "active";
/// Session has been sealed by a check-out event.
pub const STATUS_COMPLETED: &str = "completed";

/// A row from the `work_sessions` table.
///
/// `total_active_seconds` / `total_idle_seconds` are a fast-path cache
/// incremented on ingestion; they are overwritten authoritatively from
/// `activity_logs` at checkout.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkSession {
    pub id: DbId,
    pub account_id: DbId,
    pub attendance_activity_id: Option<DbId>,
    pub attendance_date: Date,
    pub session_start: Timestamp,
    pub session_end: Option<Timestamp>,
    pub total_active_seconds: i64,
    pub total_idle_seconds: i64,
    pub status: String,
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    pub token_expiry: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WorkSession {
    /// Combined active and idle seconds.
    pub fn total_work_seconds(&self) -> i64 {
        self.total_active_seconds + self.total_idle_seconds
    }

    /// Share of active time in the total, as a percentage (0 when empty).
    pub fn productivity_percentage(&self) -> f64 {
        let total = self.total_work_seconds();
        if total == 0 {
            return 0.0;
        }
        (self.total_active_seconds as f64 / total as f64) * 100.0
    }
}

/// DTO for opening a new session on check-in.
#[derive(Debug, Clone)]
pub struct CreateWorkSession {
    pub account_id: DbId,
    pub attendance_activity_id: Option<DbId>,
    pub attendance_date: Date,
    pub session_start: Timestamp,
    pub session_token: String,
    pub token_expiry: Timestamp,
}
