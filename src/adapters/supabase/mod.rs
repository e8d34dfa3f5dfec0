//! Supabase REST adapters.
//!
//! - `SupabaseIdentityProvider` - GoTrue sign-in, sign-up, OAuth URLs and
//!   the admin user endpoints
//! - `SupabaseObjectStorage` - Storage uploads, removals and public URLs
//!
//! Both share one `reqwest::Client` and authenticate admin calls with the
//! service role key.

mod identity;
mod storage;

pub use identity::SupabaseIdentityProvider;
pub use storage::SupabaseObjectStorage;

use serde_json::Value;

/// Keys Supabase services use for a human-readable error, in order.
const ERROR_MESSAGE_KEYS: &[&str] = &["msg", "error_description", "message", "error"];

/// Best message from a Supabase error body, else the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ERROR_MESSAGE_KEYS
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}
