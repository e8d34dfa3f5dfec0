//! Request and response bodies for premium endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::premium::WebhookOutcome;

/// Body of `POST /api/payments/create`; an empty body uses the default amount.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub amount: Option<Value>,
}

impl CreatePaymentRequest {
    /// Reads a body that may be empty, malformed, or not an object; all of
    /// those mean "no amount given".
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Requested amount with numeric strings coerced. `None` for an absent
    /// or null amount; NaN for anything that is not a number.
    pub fn requested_amount(&self) -> Option<f64> {
        match self.amount.as_ref()? {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    Some(s.parse().unwrap_or(f64::NAN))
                }
            }
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Array(_) | Value::Object(_) => Some(f64::NAN),
        }
    }
}

/// `{error, detail?}` body used by the payment routes.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl PaymentErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }
}

/// Acknowledgement returned to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl From<&WebhookOutcome> for WebhookAck {
    fn from(outcome: &WebhookOutcome) -> Self {
        let note = match outcome {
            WebhookOutcome::NoReference => Some("no reference_id"),
            _ => None,
        };
        Self { ok: true, note }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ack_notes_missing_reference() {
        let ack = serde_json::to_value(WebhookAck::from(&WebhookOutcome::NoReference)).unwrap();
        assert_eq!(ack, json!({"ok": true, "note": "no reference_id"}));

        let ack = serde_json::to_value(WebhookAck::from(&WebhookOutcome::UnknownOrder)).unwrap();
        assert_eq!(ack, json!({"ok": true}));
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let request = CreatePaymentRequest::from_body(br#"{"amount": 15000}"#);
        assert_eq!(request.requested_amount(), Some(15_000.0));

        let request = CreatePaymentRequest::from_body(br#"{"amount": " 15000 "}"#);
        assert_eq!(request.requested_amount(), Some(15_000.0));

        let request = CreatePaymentRequest::from_body(br#"{"amount": "500"}"#);
        assert_eq!(request.requested_amount(), Some(500.0));
    }

    #[test]
    fn non_numeric_amount_is_nan() {
        for body in [&br#"{"amount": "abc"}"#[..], br#"{"amount": [1]}"#, br#"{"amount": {}}"#] {
            let amount = CreatePaymentRequest::from_body(body).requested_amount();
            assert!(amount.unwrap().is_nan(), "{}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn missing_amount_or_unreadable_body_uses_default() {
        for body in [&b""[..], b"not json", b"42", br#"{}"#, br#"{"amount": null}"#] {
            let amount = CreatePaymentRequest::from_body(body).requested_amount();
            assert_eq!(amount, None, "{}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn error_body_omits_empty_detail() {
        let body = serde_json::to_value(PaymentErrorBody::new("Invalid session")).unwrap();
        assert_eq!(body, json!({"error": "Invalid session"}));
    }
}
