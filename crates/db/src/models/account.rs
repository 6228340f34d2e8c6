//! Account model (owned by the surrounding HR system; read-only here).

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::types::{DbId, Timestamp};

/// A row from the `accounts` table.
///
/// `company_id` is nullable: an account without a company is tolerated
/// and simply has no company-scoped allow-list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub display_name: String,
    pub company_id: Option<DbId>,
    pub created_at: Timestamp,
}
