//! Repository for the `accounts` table (read-only to this service).

use sqlx::PgPool;
use worktrack_core::types::DbId;

use crate::models::account::Account;

const ACCOUNT_COLUMNS: &str = "id, display_name, company_id, created_at";

/// Read access to accounts provisioned by the surrounding HR system.
pub struct AccountRepo;

impl AccountRepo {
    /// Find an account by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
