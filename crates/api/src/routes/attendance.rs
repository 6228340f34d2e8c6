//! Attendance event routes mounted at `/attendance` (account JWT).
//!
//! ```text
//! POST /check-in   -> check_in
//! POST /check-out  -> check_out
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(attendance::check_in))
        .route("/check-out", post(attendance::check_out))
}
