//! Application handlers.
//!
//! Command and query handlers grouped by feature area.

pub mod account;
pub mod announcement;
pub mod catalog;
pub mod premium;
pub mod reading;
