//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `supabase` - Verifies Supabase access tokens (HS256) locally
//! - `mock` - Fixed token table for tests

mod mock;
mod supabase;

pub use mock::MockSessionValidator;
pub use supabase::{SupabaseClaims, SupabaseJwtValidator};
