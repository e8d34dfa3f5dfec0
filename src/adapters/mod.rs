//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Supabase access-token validation
//! - `http` - Axum router, extractors and DTOs
//! - `memory` - In-process implementations for tests and local runs
//! - `postgres` - sqlx repositories
//! - `supabase` - GoTrue identity and Storage over REST
//! - `xendit` - QRIS payment gateway

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod supabase;
pub mod xendit;
