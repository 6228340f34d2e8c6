//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod activity_log_repo;
pub mod allowed_domain_repo;
pub mod daily_report_repo;
pub mod heartbeat_repo;
pub mod work_session_repo;

pub use account_repo::AccountRepo;
pub use activity_log_repo::ActivityLogRepo;
pub use allowed_domain_repo::AllowedDomainRepo;
pub use daily_report_repo::DailyReportRepo;
pub use heartbeat_repo::HeartbeatRepo;
pub use work_session_repo::WorkSessionRepo;
