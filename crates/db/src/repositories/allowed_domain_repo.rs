//! Repository for the `allowed_domains` table.
//!
//! Policy administration writes these rows from the surrounding system;
//! this service only reads them.

use sqlx::PgPool;
use worktrack_core::types::DbId;

use crate::models::allowed_domain::AllowedDomain;

const DOMAIN_COLUMNS: &str = "id, company_id, domain_name, is_active, created_at";

/// Read access to company-scoped and global allow-list entries.
pub struct AllowedDomainRepo;

impl AllowedDomainRepo {
    /// Active entries scoped to one company.
    pub async fn list_active_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<AllowedDomain>, sqlx::Error> {
        let query = format!(
            "SELECT {DOMAIN_COLUMNS} FROM allowed_domains \
             WHERE company_id = $1 AND is_active = TRUE \
             ORDER BY domain_name"
        );
        sqlx::query_as::<_, AllowedDomain>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Active entries that apply globally (no company scope).
    pub async fn list_active_global(pool: &PgPool) -> Result<Vec<AllowedDomain>, sqlx::Error> {
        let query = format!(
            "SELECT {DOMAIN_COLUMNS} FROM allowed_domains \
             WHERE company_id IS NULL AND is_active = TRUE \
             ORDER BY domain_name"
        );
        sqlx::query_as::<_, AllowedDomain>(&query)
            .fetch_all(pool)
            .await
    }
}
