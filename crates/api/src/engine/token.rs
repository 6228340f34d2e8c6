//! Session bearer-token issuance.
//!
//! Tokens are opaque URL-safe strings with 32 bytes of entropy and a
//! 12-hour expiry. Expiry is lazy: nothing sweeps expired tokens, they
//! simply stop validating.

use rand::RngCore;
use sqlx::PgPool;
use worktrack_db::models::work_session::WorkSession;
use worktrack_db::repositories::WorkSessionRepo;

use crate::error::{AppError, AppResult};

/// Token lifetime after issuance or refresh.
pub const TOKEN_TTL_HOURS: i64 = 12;

/// Bytes of entropy per session token.
const TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random, URL-safe session token.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        token.push_str(&format!("{byte:02x}"));
    }
    token
}

/// Return the session's current token, refreshing it first when missing
/// or expired. Idempotent while a valid token exists.
///
/// Refresh is a conditional update on the previously observed token
/// value, so two near-simultaneous refreshes cannot both install a new
/// token; the loser adopts the winner's.
pub async fn issue_or_refresh(pool: &PgPool, session: &WorkSession) -> AppResult<WorkSession> {
    let now = chrono::Utc::now();

    let token_valid = session.session_token.is_some()
        && session.token_expiry.is_some_and(|expiry| expiry > now);
    if token_valid {
        return Ok(session.clone());
    }

    let new_token = generate_session_token();
    let new_expiry = now + chrono::Duration::hours(TOKEN_TTL_HOURS);

    let refreshed = WorkSessionRepo::refresh_token_if_current(
        pool,
        session.id,
        session.session_token.as_deref(),
        &new_token,
        new_expiry,
    )
    .await?;

    match refreshed {
        Some(updated) => {
            tracing::info!(session_id = updated.id, "Issued new session token");
            Ok(updated)
        }
        // Lost the refresh race: another call already installed a fresh
        // token. Re-read and use the winner's.
        None => WorkSessionRepo::find_by_id(pool, session.id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "session {} disappeared during token refresh",
                    session.id
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_and_url_safe() {
        let token = generate_session_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}
