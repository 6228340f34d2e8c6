//! Activity ingestion: heartbeats and activity intervals reported by the
//! browser extension, authenticated by the session bearer token.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use worktrack_core::domain::canonical_domain;
use worktrack_core::interval::{resolve_bounds, validate_interval, validate_seconds};
use worktrack_core::types::Timestamp;
use worktrack_db::models::account::Account;
use worktrack_db::models::activity_log::CreateActivityLog;
use worktrack_db::models::heartbeat::CreateHeartbeat;
use worktrack_db::models::work_session::WorkSession;
use worktrack_db::repositories::{AccountRepo, ActivityLogRepo, HeartbeatRepo, WorkSessionRepo};

use crate::engine::policy;
use crate::error::{AppError, AppResult};

/// Extension-reported liveness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartbeatStatus {
    Active,
    Idle,
}

impl HeartbeatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HeartbeatStatus::Active => "active",
            HeartbeatStatus::Idle => "idle",
        }
    }
}

/// One client-reported activity interval.
///
/// `is_allowed` is the client's claim; it is accepted as input but never
/// stored -- the server recomputes the flag on every entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    pub domain_name: String,
    pub active_seconds: i64,
    pub idle_seconds: i64,
    #[serde(default)]
    pub is_allowed: Option<bool>,
    #[serde(default)]
    pub timestamp_start: Option<Timestamp>,
    #[serde(default)]
    pub timestamp_end: Option<Timestamp>,
}

/// Result of a batch submission. Per-entry failures are collected, not
/// fatal; only an auth failure on the shared token aborts the batch.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub created: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

/// Resolve the session a bearer token authenticates.
///
/// Any mismatch (unknown token, completed session, expired token) yields
/// the same uniform authentication error.
pub async fn validate_session_token(pool: &PgPool, token: &str) -> AppResult<WorkSession> {
    WorkSessionRepo::find_valid_by_token(pool, token)
        .await?
        .ok_or_else(AppError::invalid_token)
}

/// Record a heartbeat ping. Heartbeats mark liveness only and never add
/// time to session totals.
pub async fn record_heartbeat(
    pool: &PgPool,
    token: &str,
    domain_name: Option<String>,
    status: HeartbeatStatus,
) -> AppResult<()> {
    let session = validate_session_token(pool, token).await?;

    HeartbeatRepo::insert(
        pool,
        &CreateHeartbeat {
            work_session_id: session.id,
            domain_name,
            status: status.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(
        session_id = session.id,
        status = status.as_str(),
        "Heartbeat received"
    );
    Ok(())
}

/// Record a single activity interval and bump the session's running
/// counters atomically.
pub async fn record_activity(pool: &PgPool, token: &str, entry: &ActivityEntry) -> AppResult<()> {
    let session = validate_session_token(pool, token).await?;
    let account = load_account(pool, &session).await?;

    let input = prepare_log(pool, &session, &account, entry).await?;
    ActivityLogRepo::insert_with_totals(pool, &input).await?;

    tracing::info!(
        session_id = session.id,
        domain = %input.domain_name,
        active = input.active_seconds,
        idle = input.idle_seconds,
        allowed = input.is_allowed,
        "Activity log created"
    );
    Ok(())
}

/// Record a batch of activity intervals sharing one token.
///
/// Entries are processed independently: a validation failure skips that
/// entry and is reported in the outcome's error list. The session's
/// running counters are updated once after the loop with the sums of the
/// entries that were actually persisted.
pub async fn record_activity_batch(
    pool: &PgPool,
    token: &str,
    entries: &[ActivityEntry],
) -> AppResult<BatchOutcome> {
    let session = validate_session_token(pool, token).await?;
    let account = load_account(pool, &session).await?;

    let mut created = 0;
    let mut errors = Vec::new();
    let mut active_sum = 0;
    let mut idle_sum = 0;

    for entry in entries {
        let input = match prepare_log(pool, &session, &account, entry).await {
            Ok(input) => input,
            Err(err) => {
                errors.push(format!("{}: {err}", canonical_domain(&entry.domain_name)));
                continue;
            }
        };

        match ActivityLogRepo::insert(pool, &input).await {
            Ok(_) => {
                created += 1;
                active_sum += input.active_seconds;
                idle_sum += input.idle_seconds;
            }
            Err(err) => {
                tracing::error!(
                    session_id = session.id,
                    domain = %input.domain_name,
                    error = %err,
                    "Failed to persist batch entry"
                );
                errors.push(format!("{}: storage failure", input.domain_name));
            }
        }
    }

    if created > 0 {
        WorkSessionRepo::increment_totals(pool, session.id, active_sum, idle_sum).await?;
    }

    tracing::info!(
        session_id = session.id,
        created,
        total = entries.len(),
        error_count = errors.len(),
        "Batch activity logs processed"
    );

    Ok(BatchOutcome {
        created,
        total: entries.len(),
        errors,
    })
}

/// Validate one entry and turn it into a storable row: normalized
/// domain, server-computed allowed flag, resolved interval bounds.
async fn prepare_log(
    pool: &PgPool,
    session: &WorkSession,
    account: &Account,
    entry: &ActivityEntry,
) -> AppResult<CreateActivityLog> {
    validate_seconds(entry.active_seconds, entry.idle_seconds)?;

    let domain_name = canonical_domain(&entry.domain_name);
    let is_allowed = policy::is_domain_allowed(pool, account, &domain_name).await?;

    if entry.is_allowed.is_some_and(|claimed| claimed != is_allowed) {
        tracing::debug!(
            session_id = session.id,
            domain = %domain_name,
            client_claimed = entry.is_allowed,
            server_computed = is_allowed,
            "Client allowed-flag overridden"
        );
    }

    let (timestamp_start, timestamp_end) = resolve_bounds(
        entry.timestamp_start,
        entry.timestamp_end,
        entry.active_seconds,
        entry.idle_seconds,
        chrono::Utc::now(),
    );
    validate_interval(timestamp_start, timestamp_end)?;

    Ok(CreateActivityLog {
        work_session_id: session.id,
        domain_name,
        active_seconds: entry.active_seconds,
        idle_seconds: entry.idle_seconds,
        is_allowed,
        timestamp_start,
        timestamp_end,
    })
}

async fn load_account(pool: &PgPool, session: &WorkSession) -> AppResult<Account> {
    AccountRepo::find_by_id(pool, session.account_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "account {} missing for session {}",
                session.account_id, session.id
            ))
        })
}
