//! Premium payments: order ids, amounts and status transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PaymentId, Timestamp, UserId, ValidationError};

/// Gateway name stored on every payment row.
pub const PROVIDER_XENDIT: &str = "xendit";

/// Number of recent payments shown on the premium page.
pub const RECENT_PAYMENTS_LIMIT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Expired,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Expired => "expired",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "expired" => Ok(PaymentStatus::Expired),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown payment status '{}'", other),
            )),
        }
    }

    /// Paid is terminal. A settlement is honoured even after the order
    /// expired or failed; expiry and failure only apply to pending orders.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        match (self, next) {
            (PaymentStatus::Paid, _) | (_, PaymentStatus::Pending) => false,
            (_, PaymentStatus::Paid) => true,
            (PaymentStatus::Pending, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merchant reference sent to the gateway: `prem_{user_id}_{unix_millis}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn for_premium(user: &UserId, at: Timestamp) -> Self {
        Self(format!("prem_{}_{}", user, at.unix_millis()))
    }

    /// Wraps a reference read from a webhook or the database.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("reference_id"));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Amount in whole rupiah, at least the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// `requested` falls back to `default`; fractional or non-finite
    /// values are rejected along with anything under `minimum`.
    pub fn resolve(requested: Option<f64>, default: i64, minimum: i64) -> Result<Self, ValidationError> {
        let value = match requested {
            None => default as f64,
            Some(v) => v,
        };
        if !value.is_finite() || value < minimum as f64 {
            return Err(ValidationError::out_of_range(
                "amount",
                minimum,
                i64::MAX,
                if value.is_finite() { value as i64 } else { 0 },
            ));
        }
        if value.fract() != 0.0 || value >= i64::MAX as f64 {
            return Err(ValidationError::invalid_format("amount", "must be a whole number"));
        }
        Ok(Self(value as i64))
    }

    pub fn from_db(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A stored payment row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub provider: String,
    pub order_id: OrderId,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub raw_payload: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert model for a freshly created premium order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub user_id: UserId,
    pub provider: String,
    pub order_id: OrderId,
    pub amount: Amount,
}

impl NewPayment {
    pub fn premium(user_id: UserId, amount: Amount, at: Timestamp) -> Self {
        Self {
            order_id: OrderId::for_premium(&user_id, at),
            user_id,
            provider: PROVIDER_XENDIT.to_string(),
            amount,
        }
    }
}

/// Row of the "recent payments" table on the premium page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
}

impl From<Payment> for PaymentSummary {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            amount: p.amount,
            status: p.status,
            created_at: p.created_at,
        }
    }
}
