//! The state-changing core of the service.
//!
//! - [`token`]: session bearer-token issuance and refresh
//! - [`policy`]: company-scoped and global domain allow-list checks
//! - [`ingestion`]: heartbeat and activity recording against a live session
//! - [`lifecycle`]: reaction to external check-in/check-out events
//! - [`aggregation`]: checkout reconciliation and daily report projection
//!
//! Engines hold no state of their own; every call consults the database
//! fresh, which is the single source of truth.

pub mod aggregation;
pub mod ingestion;
pub mod lifecycle;
pub mod policy;
pub mod token;
