//! Extension heartbeat model. Purely observational rows.

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::types::{DbId, Timestamp};

/// A row from the `extension_heartbeats` table. `recorded_at` is
/// server-assigned on insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExtensionHeartbeat {
    pub id: DbId,
    pub work_session_id: DbId,
    pub recorded_at: Timestamp,
    pub domain_name: Option<String>,
    pub status: String,
}

/// DTO for recording one heartbeat ping.
#[derive(Debug, Clone)]
pub struct CreateHeartbeat {
    pub work_session_id: DbId,
    pub domain_name: Option<String>,
    /// `"active"` or `"idle"` (validated at the API boundary).
    pub status: String,
}
