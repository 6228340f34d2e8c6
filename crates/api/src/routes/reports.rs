//! Daily report routes mounted at `/reports` (account JWT).
//!
//! ```text
//! GET  /daily          -> list_daily
//! POST /daily/rebuild  -> rebuild
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(reports::list_daily))
        .route("/daily/rebuild", post(reports::rebuild))
}
