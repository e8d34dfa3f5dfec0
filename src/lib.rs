//! FluxInkVerse - comic and manga reading service.
//!
//! Catalog browsing, chapter reading, star ratings, accounts backed by
//! Supabase Auth, admin publishing tools and a QRIS premium upgrade paid
//! through Xendit.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
