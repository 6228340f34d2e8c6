//! Repository for the `daily_reports` table.

use sqlx::PgPool;
use worktrack_core::types::{Date, DbId};

use crate::models::daily_report::{DailyReport, UpsertDailyReport};

const REPORT_COLUMNS: &str = "\
    id, account_id, work_session_id, report_date, total_work_time, \
    productive_time, idle_time, violation_count, top_domains, \
    created_at, updated_at";

/// Write and read operations for the denormalized daily rollup.
pub struct DailyReportRepo;

impl DailyReportRepo {
    /// Create or overwrite the report row for `(account, date)`.
    ///
    /// Every field is replaced wholesale; the rollup is a recomputed
    /// projection, never an incremental patch.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertDailyReport,
    ) -> Result<DailyReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_reports \
                (account_id, work_session_id, report_date, total_work_time, \
                 productive_time, idle_time, violation_count, top_domains) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT ON CONSTRAINT uq_daily_reports_account_date \
             DO UPDATE SET \
                 work_session_id = EXCLUDED.work_session_id, \
                 total_work_time = EXCLUDED.total_work_time, \
                 productive_time = EXCLUDED.productive_time, \
                 idle_time = EXCLUDED.idle_time, \
                 violation_count = EXCLUDED.violation_count, \
                 top_domains = EXCLUDED.top_domains, \
                 updated_at = NOW() \
             RETURNING {REPORT_COLUMNS}"
        );
        sqlx::query_as::<_, DailyReport>(&query)
            .bind(input.account_id)
            .bind(input.work_session_id)
            .bind(input.report_date)
            .bind(input.total_work_time)
            .bind(input.productive_time)
            .bind(input.idle_time)
            .bind(input.violation_count)
            .bind(&input.top_domains)
            .fetch_one(pool)
            .await
    }

    /// The report row for one `(account, date)`, if any.
    pub async fn find_by_account_date(
        pool: &PgPool,
        account_id: DbId,
        report_date: Date,
    ) -> Result<Option<DailyReport>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} FROM daily_reports \
             WHERE account_id = $1 AND report_date = $2"
        );
        sqlx::query_as::<_, DailyReport>(&query)
            .bind(account_id)
            .bind(report_date)
            .fetch_optional(pool)
            .await
    }

    /// Report rows for one date, optionally filtered by account.
    pub async fn list_for_date(
        pool: &PgPool,
        report_date: Date,
        account_id: Option<DbId>,
    ) -> Result<Vec<DailyReport>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} FROM daily_reports \
             WHERE report_date = $1 \
               AND ($2::BIGINT IS NULL OR account_id = $2) \
             ORDER BY account_id"
        );
        sqlx::query_as::<_, DailyReport>(&query)
            .bind(report_date)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }
}
