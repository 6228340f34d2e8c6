//! Storage-layer tests for extension heartbeats.

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use worktrack_core::types::DbId;
use worktrack_db::models::heartbeat::CreateHeartbeat;
use worktrack_db::models::work_session::CreateWorkSession;
use worktrack_db::repositories::{HeartbeatRepo, WorkSessionRepo};

async fn open_session(pool: &PgPool) -> DbId {
    let (account_id,): (DbId,) =
        sqlx::query_as("INSERT INTO accounts (display_name) VALUES ('ada') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();

    let now = Utc::now();
    WorkSessionRepo::create_active(
        pool,
        &CreateWorkSession {
            account_id,
            attendance_activity_id: Some(601),
            attendance_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            session_start: now,
            session_token: "tok-heartbeat".to_string(),
            token_expiry: now + Duration::hours(12),
        },
    )
    .await
    .unwrap()
    .unwrap()
    .id
}

/// Heartbeats are stamped by the database and the latest one wins the
/// lookup.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_latest_for_session(pool: PgPool) {
    let session_id = open_session(&pool).await;

    assert!(HeartbeatRepo::latest_for_session(&pool, session_id)
        .await
        .unwrap()
        .is_none());

    for (domain, status) in [(Some("github.com"), "active"), (None, "idle")] {
        HeartbeatRepo::insert(
            &pool,
            &CreateHeartbeat {
                work_session_id: session_id,
                domain_name: domain.map(str::to_string),
                status: status.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let latest = HeartbeatRepo::latest_for_session(&pool, session_id)
        .await
        .unwrap()
        .expect("a heartbeat must be found");
    assert_eq!(latest.status, "idle");
    assert_eq!(latest.domain_name, None);
}

/// The table rejects status values outside the active/idle vocabulary.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_vocabulary_enforced(pool: PgPool) {
    let session_id = open_session(&pool).await;

    let result = HeartbeatRepo::insert(
        &pool,
        &CreateHeartbeat {
            work_session_id: session_id,
            domain_name: None,
            status: "sleeping".to_string(),
        },
    )
    .await;
    assert!(result.is_err(), "unknown status must violate the check");
}
