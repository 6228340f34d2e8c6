pub mod account;
pub mod activity_log;
pub mod allowed_domain;
pub mod daily_report;
pub mod heartbeat;
pub mod work_session;
