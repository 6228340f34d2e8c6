//! Pure domain logic for the work-session activity monitoring service.
//!
//! Everything in this crate is side-effect free: domain name
//! canonicalization, activity interval resolution and validation, and the
//! daily-summary projection over recorded activity rows. Persistence and
//! transport live in `worktrack-db` and `worktrack-api`.

pub mod domain;
pub mod error;
pub mod interval;
pub mod report;
pub mod types;
