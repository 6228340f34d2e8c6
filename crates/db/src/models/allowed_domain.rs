//! Allow-list entry model. Written by policy administration (external);
//! read-only to this service.

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::types::{DbId, Timestamp};

/// A row from the `allowed_domains` table.
///
/// `company_id = NULL` means the entry applies globally. `domain_name`
/// is stored as entered; comparisons normalize both sides.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AllowedDomain {
    pub id: DbId,
    pub company_id: Option<DbId>,
    pub domain_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}
