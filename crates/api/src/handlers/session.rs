//! Session token issuance and status handlers.
//!
//! Token issuance is scoped to the logged-in account (JWT); the status
//! endpoint authenticates with the opaque session token itself, since
//! the extension holds no JWT.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use worktrack_core::error::CoreError;
use worktrack_core::types::{DbId, Timestamp};
use worktrack_db::repositories::{AccountRepo, WorkSessionRepo};

use crate::engine::{ingestion, token};
use crate::error::{AppError, AppResult, Json};
use crate::middleware::auth::AuthAccount;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub session_id: DbId,
    pub account_id: DbId,
    pub expiry_time: Timestamp,
}

/// POST /api/v1/sessions/token
///
/// Hand the extension a bearer token for the account's active session.
/// Returns the existing token while it is still valid; mints a fresh one
/// when it is missing or expired. Fails when the account has no active
/// session, i.e. is not checked in.
pub async fn issue_token(
    auth: AuthAccount,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let account = AccountRepo::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "account",
            id: auth.account_id,
        }))?;

    let session = WorkSessionRepo::find_active_by_account(&state.pool, account.id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("No active work session. Check in before requesting a token.".into())
        })?;

    let session = token::issue_or_refresh(&state.pool, &session).await?;

    let (token, expiry_time) = match (session.session_token.clone(), session.token_expiry) {
        (Some(token), Some(expiry)) => (token, expiry),
        _ => {
            return Err(AppError::InternalError(format!(
                "session {} has no token after issuance",
                session.id
            )))
        }
    };

    tracing::info!(
        session_id = session.id,
        account_id = account.id,
        "Session token handed to extension"
    );

    Ok(Json(TokenResponse {
        token,
        session_id: session.id,
        account_id: account.id,
        expiry_time,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: DbId,
    pub account_id: DbId,
    pub status: String,
    pub session_start: Timestamp,
    pub total_active_seconds: i64,
    pub total_idle_seconds: i64,
}

/// GET /api/v1/sessions/status?token=...
///
/// Lightweight poll the extension uses to confirm its token still
/// authenticates. Any token failure is the uniform 401.
pub async fn session_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<impl IntoResponse> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing token parameter".into()))?;

    let session = ingestion::validate_session_token(&state.pool, &token).await?;

    Ok(Json(SessionStatusResponse {
        session_id: session.id,
        account_id: session.account_id,
        status: session.status.clone(),
        session_start: session.session_start,
        total_active_seconds: session.total_active_seconds,
        total_idle_seconds: session.total_idle_seconds,
    }))
}
