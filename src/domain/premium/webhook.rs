//! Gateway callback parsing and authentication.
//!
//! Xendit posts QR payment callbacks with the merchant reference and a
//! status, nested differently depending on the event version. The only
//! authentication is the `x-callback-token` header shared at setup time.

use serde_json::Value;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::payment::PaymentStatus;

/// Header carrying the shared callback token.
pub const CALLBACK_TOKEN_HEADER: &str = "x-callback-token";

/// Objects searched, in order, for `reference_id` and `status`.
const FIELD_CONTAINERS: &[&str] = &["data", "qr_code", "payment"];

const PAID_STATUSES: &[&str] = &["PAID", "COMPLETED", "SUCCEEDED", "SUCCESS"];
const EXPIRED_STATUSES: &[&str] = &["EXPIRED", "INACTIVE"];
const FAILED_STATUSES: &[&str] = &["FAILED"];

/// Reference and status pulled out of a callback body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEvent {
    pub reference_id: Option<String>,
    pub status: Option<String>,
}

impl CallbackEvent {
    /// Reads each field from the top level, then `data`, `qr_code`,
    /// `payment`. Blank strings count as absent.
    pub fn extract(payload: &Value) -> Self {
        Self {
            reference_id: find_field(payload, "reference_id"),
            status: find_field(payload, "status"),
        }
    }

    /// Payment status this callback moves the order to, if any.
    pub fn target_status(&self) -> Option<PaymentStatus> {
        classify_status(self.status.as_deref()?)
    }
}

fn find_field(payload: &Value, key: &str) -> Option<String> {
    std::iter::once(payload)
        .chain(FIELD_CONTAINERS.iter().filter_map(|c| payload.get(*c)))
        .find_map(|obj| {
            obj.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
}

/// Maps a gateway status string, case-insensitively.
pub fn classify_status(status: &str) -> Option<PaymentStatus> {
    let upper = status.trim().to_uppercase();
    if PAID_STATUSES.contains(&upper.as_str()) {
        Some(PaymentStatus::Paid)
    } else if EXPIRED_STATUSES.contains(&upper.as_str()) {
        Some(PaymentStatus::Expired)
    } else if FAILED_STATUSES.contains(&upper.as_str()) {
        Some(PaymentStatus::Failed)
    } else {
        None
    }
}

/// Compares the callback header to the configured token.
#[derive(Clone)]
pub struct CallbackTokenVerifier {
    expected: secrecy::SecretString,
}

impl CallbackTokenVerifier {
    pub fn new(expected: secrecy::SecretString) -> Self {
        Self { expected }
    }

    /// An unset expected token rejects every request.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), WebhookError> {
        use secrecy::ExposeSecret;

        let expected = self.expected.expose_secret().as_bytes();
        let presented = presented.unwrap_or_default().as_bytes();
        if expected.is_empty() || !bool::from(expected.ct_eq(presented)) {
            return Err(WebhookError::InvalidToken);
        }
        Ok(())
    }
}

impl std::fmt::Debug for CallbackTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTokenVerifier").finish_non_exhaustive()
    }
}
