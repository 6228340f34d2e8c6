//! Domain policy checks against the company-scoped and global allow-lists.

use sqlx::PgPool;
use worktrack_core::domain::normalize_domain;
use worktrack_db::models::account::Account;
use worktrack_db::repositories::AllowedDomainRepo;

/// Decide whether a domain is permitted for the given account.
///
/// The candidate and every allow-list entry are normalized at comparison
/// time; entries are stored as entered so legacy or manually-entered
/// rows still match. An empty (normalized) domain is never allowed.
///
/// Checks the account's company scope first, then the global scope.
/// An account without a company only sees the global list.
pub async fn is_domain_allowed(
    pool: &PgPool,
    account: &Account,
    domain: &str,
) -> Result<bool, sqlx::Error> {
    let candidate = normalize_domain(domain);
    if candidate.is_empty() {
        return Ok(false);
    }

    if let Some(company_id) = account.company_id {
        let entries = AllowedDomainRepo::list_active_for_company(pool, company_id).await?;
        if entries
            .iter()
            .any(|entry| normalize_domain(&entry.domain_name) == candidate)
        {
            return Ok(true);
        }
    }

    let global = AllowedDomainRepo::list_active_global(pool).await?;
    Ok(global
        .iter()
        .any(|entry| normalize_domain(&entry.domain_name) == candidate))
}
