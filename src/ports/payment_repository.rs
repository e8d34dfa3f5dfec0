//! Payment repository port.
//!
//! Settlement touches two tables (the payment and the owner's profile) and
//! must be atomic; implementations run it in one transaction.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::premium::{NewPayment, OrderId, Payment, PaymentStatus};

/// Result of applying a paid callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Payment moved to paid and the owner became premium.
    Settled { user_id: UserId },
    /// Payment was already paid; nothing changed.
    AlreadyPaid { user_id: UserId },
    /// No payment carries this order id.
    UnknownOrder,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a pending payment.
    async fn insert(&self, payment: &NewPayment) -> Result<Payment, DomainError>;

    /// Stores the latest gateway body on the payment. Returns false when
    /// no payment has this order id.
    async fn attach_payload(&self, order_id: &OrderId, payload: &Value) -> Result<bool, DomainError>;

    async fn find_by_order(&self, order_id: &OrderId) -> Result<Option<Payment>, DomainError>;

    /// Marks the payment paid and its owner premium since `at`.
    async fn settle(&self, order_id: &OrderId, at: Timestamp) -> Result<Settlement, DomainError>;

    /// Moves a payment to `status` if the transition is allowed. Returns
    /// whether a row changed.
    async fn transition(&self, order_id: &OrderId, status: PaymentStatus) -> Result<bool, DomainError>;

    /// Newest first.
    async fn recent_for_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<Payment>, DomainError>;
}
