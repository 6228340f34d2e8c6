//! Repository for the `work_sessions` table.
//!
//! The queries here carry the storage-layer half of the concurrency
//! discipline: session creation relies on the partial unique index over
//! active sessions, counter updates are single atomic statements, and
//! token refresh is a conditional update on the previously observed
//! token value.

use sqlx::PgPool;
use worktrack_core::types::{DbId, Timestamp};

use crate::models::work_session::{CreateWorkSession, WorkSession, STATUS_ACTIVE};

const SESSION_COLUMNS: &str = "\
    id, account_id, attendance_activity_id, attendance_date, \
    session_start, session_end, total_active_seconds, total_idle_seconds, \
    status, session_token, token_expiry, created_at, updated_at";

/// CRUD and lifecycle queries for work sessions.
pub struct WorkSessionRepo;

impl WorkSessionRepo {
    /// Open a new active session for a check-in event.
    ///
    /// Returns `None` when an active session already references the same
    /// attendance activity (the partial unique index absorbs the race
    /// between two concurrent check-in signals).
    pub async fn create_active(
        pool: &PgPool,
        input: &CreateWorkSession,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_sessions \
                (account_id, attendance_activity_id, attendance_date, \
                 session_start, status, session_token, token_expiry) \
             VALUES ($1, $2, $3, $4, '{STATUS_ACTIVE}', $5, $6) \
             ON CONFLICT (attendance_activity_id) WHERE status = '{STATUS_ACTIVE}' \
                AND attendance_activity_id IS NOT NULL \
             DO NOTHING \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(input.account_id)
            .bind(input.attendance_activity_id)
            .bind(input.attendance_date)
            .bind(input.session_start)
            .bind(&input.session_token)
            .bind(input.token_expiry)
            .fetch_optional(pool)
            .await
    }

    /// Find a session by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!("SELECT {SESSION_COLUMNS} FROM work_sessions WHERE id = $1");
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active session referencing an attendance activity.
    pub async fn find_active_by_attendance(
        pool: &PgPool,
        attendance_activity_id: DbId,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE attendance_activity_id = $1 AND status = '{STATUS_ACTIVE}'"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(attendance_activity_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the most recently started active session for an account.
    pub async fn find_active_by_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE account_id = $1 AND status = '{STATUS_ACTIVE}' \
             ORDER BY session_start DESC LIMIT 1"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the session a bearer token authenticates, if the token is
    /// currently valid (active session, unexpired token).
    ///
    /// Callers must map `None` to a uniform authentication failure; this
    /// method intentionally cannot distinguish unknown, sealed, and
    /// expired tokens.
    pub async fn find_valid_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE session_token = $1 AND status = '{STATUS_ACTIVE}' \
               AND token_expiry > NOW()"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Replace the session token, but only if the stored token still
    /// matches the previously observed value.
    ///
    /// Returns `None` when another caller refreshed the token first; the
    /// caller should re-read the session and use the winner's token.
    pub async fn refresh_token_if_current(
        pool: &PgPool,
        id: DbId,
        observed_token: Option<&str>,
        new_token: &str,
        new_expiry: Timestamp,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "UPDATE work_sessions \
             SET session_token = $3, token_expiry = $4, updated_at = NOW() \
             WHERE id = $1 AND session_token IS NOT DISTINCT FROM $2 \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(id)
            .bind(observed_token)
            .bind(new_token)
            .bind(new_expiry)
            .fetch_optional(pool)
            .await
    }

    /// Atomically add reported seconds to the running counters.
    pub async fn increment_totals(
        pool: &PgPool,
        id: DbId,
        active_seconds: i64,
        idle_seconds: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE work_sessions \
             SET total_active_seconds = total_active_seconds + $2, \
                 total_idle_seconds = total_idle_seconds + $3, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(active_seconds)
        .bind(idle_seconds)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite the running counters with authoritative sums.
    pub async fn overwrite_totals(
        pool: &PgPool,
        id: DbId,
        active_seconds: i64,
        idle_seconds: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE work_sessions \
             SET total_active_seconds = $2, total_idle_seconds = $3, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(active_seconds)
        .bind(idle_seconds)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Seal an active session: set its end timestamp and mark it
    /// completed. The token is left in place; validation rejects it via
    /// the status check.
    ///
    /// Returns `None` if the session was not active.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        session_end: Timestamp,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "UPDATE work_sessions \
             SET session_end = $2, status = 'completed', updated_at = NOW() \
             WHERE id = $1 AND status = '{STATUS_ACTIVE}' \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(id)
            .bind(session_end)
            .fetch_optional(pool)
            .await
    }

    /// List completed sessions, optionally filtered by account and/or
    /// attendance date. Used by the report rebuild maintenance path.
    pub async fn list_completed(
        pool: &PgPool,
        account_id: Option<DbId>,
        attendance_date: Option<worktrack_core::types::Date>,
    ) -> Result<Vec<WorkSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE status = 'completed' \
               AND ($1::BIGINT IS NULL OR account_id = $1) \
               AND ($2::DATE IS NULL OR attendance_date = $2) \
             ORDER BY attendance_date, session_start"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(account_id)
            .bind(attendance_date)
            .fetch_all(pool)
            .await
    }
}
