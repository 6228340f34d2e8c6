//! Repository for the `extension_heartbeats` table.

use sqlx::PgPool;
use worktrack_core::types::DbId;

use crate::models::heartbeat::{CreateHeartbeat, ExtensionHeartbeat};

const HEARTBEAT_COLUMNS: &str = "id, work_session_id, recorded_at, domain_name, status";

/// Append and read operations for extension heartbeats.
pub struct HeartbeatRepo;

impl HeartbeatRepo {
    /// Record one heartbeat ping. `recorded_at` is assigned by the
    /// database, not taken from the client.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateHeartbeat,
    ) -> Result<ExtensionHeartbeat, sqlx::Error> {
        let query = format!(
            "INSERT INTO extension_heartbeats (work_session_id, domain_name, status) \
             VALUES ($1, $2, $3) \
             RETURNING {HEARTBEAT_COLUMNS}"
        );
        sqlx::query_as::<_, ExtensionHeartbeat>(&query)
            .bind(input.work_session_id)
            .bind(&input.domain_name)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// The most recent heartbeat for a session, if any.
    pub async fn latest_for_session(
        pool: &PgPool,
        work_session_id: DbId,
    ) -> Result<Option<ExtensionHeartbeat>, sqlx::Error> {
        let query = format!(
            "SELECT {HEARTBEAT_COLUMNS} FROM extension_heartbeats \
             WHERE work_session_id = $1 \
             ORDER BY recorded_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, ExtensionHeartbeat>(&query)
            .bind(work_session_id)
            .fetch_optional(pool)
            .await
    }
}
