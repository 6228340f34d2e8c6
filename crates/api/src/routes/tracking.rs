//! Ingestion routes mounted at `/tracking`. All authenticate with the
//! session token carried in the request body.
//!
//! ```text
//! POST /heartbeat       -> heartbeat
//! POST /activity        -> activity_log
//! POST /activity/batch  -> activity_log_batch
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::tracking;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/heartbeat", post(tracking::heartbeat))
        .route("/activity", post(tracking::activity_log))
        .route("/activity/batch", post(tracking::activity_log_batch))
}
