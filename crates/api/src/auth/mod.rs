//! Account authentication for the non-bearer-token endpoints.

pub mod jwt;
