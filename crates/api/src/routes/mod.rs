pub mod attendance;
pub mod health;
pub mod reports;
pub mod session;
pub mod tracking;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions/token                 issue or refresh session token (JWT)
/// /sessions/status                session status poll (session token)
///
/// /tracking/heartbeat             liveness ping (session token)
/// /tracking/activity              single activity interval (session token)
/// /tracking/activity/batch        batched activity intervals (session token)
///
/// /attendance/check-in            open session on check-in (JWT)
/// /attendance/check-out           seal session on check-out (JWT)
///
/// /reports/daily                  read daily reports (JWT)
/// /reports/daily/rebuild          rebuild reports from activity logs (JWT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sessions", session::router())
        .nest("/tracking", tracking::router())
        .nest("/attendance", attendance::router())
        .nest("/reports", reports::router())
}
