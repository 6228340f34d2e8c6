//! Repository for the `activity_logs` table (append-only).

use sqlx::PgPool;
use worktrack_core::types::{Date, DbId};

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

const LOG_COLUMNS: &str = "\
    id, work_session_id, domain_name, active_seconds, idle_seconds, \
    is_allowed, timestamp_start, timestamp_end, created_at";

const LOG_JOIN_COLUMNS: &str = "\
    al.id, al.work_session_id, al.domain_name, al.active_seconds, \
    al.idle_seconds, al.is_allowed, al.timestamp_start, al.timestamp_end, \
    al.created_at";

/// Append and read operations for activity intervals.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one interval row without touching session counters.
    /// Used by the batch path, which updates counters once per batch.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs \
                (work_session_id, domain_name, active_seconds, idle_seconds, \
                 is_allowed, timestamp_start, timestamp_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {LOG_COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.work_session_id)
            .bind(&input.domain_name)
            .bind(input.active_seconds)
            .bind(input.idle_seconds)
            .bind(input.is_allowed)
            .bind(input.timestamp_start)
            .bind(input.timestamp_end)
            .fetch_one(pool)
            .await
    }

    /// Append one interval row and bump the owning session's running
    /// counters in a single transaction, so the pair is all-or-nothing.
    pub async fn insert_with_totals(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO activity_logs \
                (work_session_id, domain_name, active_seconds, idle_seconds, \
                 is_allowed, timestamp_start, timestamp_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {LOG_COLUMNS}"
        );
        let log = sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.work_session_id)
            .bind(&input.domain_name)
            .bind(input.active_seconds)
            .bind(input.idle_seconds)
            .bind(input.is_allowed)
            .bind(input.timestamp_start)
            .bind(input.timestamp_end)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE work_sessions \
             SET total_active_seconds = total_active_seconds + $2, \
                 total_idle_seconds = total_idle_seconds + $3, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(input.work_session_id)
        .bind(input.active_seconds)
        .bind(input.idle_seconds)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            work_session_id = input.work_session_id,
            domain = %input.domain_name,
            active = input.active_seconds,
            idle = input.idle_seconds,
            allowed = input.is_allowed,
            "Recorded activity interval"
        );

        Ok(log)
    }

    /// All rows for one session, in interval order.
    pub async fn list_for_session(
        pool: &PgPool,
        work_session_id: DbId,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM activity_logs \
             WHERE work_session_id = $1 \
             ORDER BY timestamp_start, id"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(work_session_id)
            .fetch_all(pool)
            .await
    }

    /// All rows for every session of `(account, date)`, in interval
    /// order. The daily aggregation folds over this set so a second
    /// session on the same day does not erase the first one's
    /// contribution.
    pub async fn list_for_account_date(
        pool: &PgPool,
        account_id: DbId,
        attendance_date: Date,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_JOIN_COLUMNS} FROM activity_logs al \
             JOIN work_sessions ws ON al.work_session_id = ws.id \
             WHERE ws.account_id = $1 AND ws.attendance_date = $2 \
             ORDER BY al.timestamp_start, al.id"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(account_id)
            .bind(attendance_date)
            .fetch_all(pool)
            .await
    }

    /// Authoritative `(active, idle)` second sums for one session.
    pub async fn sum_for_session(
        pool: &PgPool,
        work_session_id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COALESCE(SUM(active_seconds), 0)::BIGINT, \
                    COALESCE(SUM(idle_seconds), 0)::BIGINT \
             FROM activity_logs WHERE work_session_id = $1",
        )
        .bind(work_session_id)
        .fetch_one(pool)
        .await
    }
}
