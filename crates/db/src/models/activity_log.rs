//! Activity log model and DTOs. Rows are append-only.

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::types::{DbId, Timestamp};

/// A row from the `activity_logs` table.
///
/// `is_allowed` is always server-computed; the client-declared flag is
/// never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub work_session_id: DbId,
    pub domain_name: String,
    pub active_seconds: i64,
    pub idle_seconds: i64,
    pub is_allowed: bool,
    pub timestamp_start: Timestamp,
    pub timestamp_end: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for appending one activity interval.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub work_session_id: DbId,
    pub domain_name: String,
    pub active_seconds: i64,
    pub idle_seconds: i64,
    pub is_allowed: bool,
    pub timestamp_start: Timestamp,
    pub timestamp_end: Timestamp,
}
