//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, auth types, errors)
//! - `catalog` - Comics, browsing filters and star ratings
//! - `reading` - Chapters, volume grouping and page URLs
//! - `account` - Identities, profiles, roles and avatars
//! - `announcement` - Site announcements
//! - `premium` - QRIS payments and gateway callbacks

pub mod account;
pub mod announcement;
pub mod catalog;
pub mod foundation;
pub mod premium;
pub mod reading;
