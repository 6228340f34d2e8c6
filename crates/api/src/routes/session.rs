//! Session token routes mounted at `/sessions`.
//!
//! ```text
//! POST /token   -> issue_token (account JWT)
//! GET  /status  -> session_status (session token in query)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token", post(session::issue_token))
        .route("/status", get(session::session_status))
}
