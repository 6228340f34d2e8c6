//! HTTP handlers, grouped by surface.
//!
//! - [`session`]: token issuance and session status (account JWT / token)
//! - [`tracking`]: extension ingestion endpoints (session token)
//! - [`attendance`]: check-in/check-out event intake (account JWT)
//! - [`reports`]: daily report reads and maintenance rebuild (account JWT)

pub mod attendance;
pub mod reports;
pub mod session;
pub mod tracking;
