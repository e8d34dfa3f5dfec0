//! HandlePaymentWebhookHandler - Command handler for gateway callbacks.
//!
//! Flow: token check, JSON parse, store the raw body on the payment, then
//! act on the status. Paid callbacks settle the order and grant premium in
//! one transaction; repeats are acknowledged without changes. Expiry and
//! failure only move pending orders. Anything else is acknowledged so the
//! gateway stops retrying.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::premium::{CallbackEvent, CallbackTokenVerifier, OrderId, PaymentStatus, WebhookError};
use crate::ports::{PaymentRepository, Settlement};

#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Value of the `x-callback-token` header, if sent.
    pub callback_token: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// No reference id anywhere in the body.
    NoReference,
    /// Order paid and owner made premium.
    Settled { user_id: UserId },
    /// Order was already paid.
    AlreadyPaid { user_id: UserId },
    /// Paid callback for an order we never created.
    UnknownOrder,
    /// Pending order moved to expired or failed.
    StatusChanged { status: PaymentStatus },
    /// Status ignored or transition not allowed.
    Acknowledged,
}

pub struct HandlePaymentWebhookHandler {
    payments: Arc<dyn PaymentRepository>,
    verifier: CallbackTokenVerifier,
}

impl HandlePaymentWebhookHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, verifier: CallbackTokenVerifier) -> Self {
        Self { payments, verifier }
    }

    pub async fn handle(&self, cmd: HandlePaymentWebhookCommand) -> Result<WebhookOutcome, WebhookError> {
        // 1. Authenticate
        if let Err(e) = self.verifier.verify(cmd.callback_token.as_deref()) {
            tracing::warn!("Rejected payment callback with bad token");
            return Err(e);
        }

        // 2. Parse
        let payload: Value =
            serde_json::from_slice(&cmd.body).map_err(|e| WebhookError::ParseError(e.to_string()))?;
        let event = CallbackEvent::extract(&payload);

        let Some(order_id) = event
            .reference_id
            .as_deref()
            .and_then(|r| OrderId::parse(r).ok())
        else {
            tracing::info!("Payment callback without reference_id");
            return Ok(WebhookOutcome::NoReference);
        };

        // 3. Keep the body for debugging
        self.payments
            .attach_payload(&order_id, &payload)
            .await
            .map_err(|e| WebhookError::Database(e.to_string()))?;

        // 4. Act on the status
        let outcome = match event.target_status() {
            Some(PaymentStatus::Paid) => {
                let settlement = self
                    .payments
                    .settle(&order_id, Timestamp::now())
                    .await
                    .map_err(|e| WebhookError::Database(e.to_string()))?;
                match settlement {
                    Settlement::Settled { user_id } => WebhookOutcome::Settled { user_id },
                    Settlement::AlreadyPaid { user_id } => WebhookOutcome::AlreadyPaid { user_id },
                    Settlement::UnknownOrder => WebhookOutcome::UnknownOrder,
                }
            }
            Some(status) => {
                let changed = self
                    .payments
                    .transition(&order_id, status)
                    .await
                    .map_err(|e| WebhookError::Database(e.to_string()))?;
                if changed {
                    WebhookOutcome::StatusChanged { status }
                } else {
                    WebhookOutcome::Acknowledged
                }
            }
            None => WebhookOutcome::Acknowledged,
        };

        tracing::info!(
            order_id = %order_id,
            status = event.status.as_deref().unwrap_or(""),
            outcome = ?outcome,
            "Payment callback processed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::premium::{Amount, NewPayment};
    use crate::ports::ProfileRepository;
    use secrecy::SecretString;
    use serde_json::json;
    use uuid::Uuid;

    const TOKEN: &str = "cb-token";

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    struct Fixture {
        db: Arc<InMemoryDatabase>,
        handler: HandlePaymentWebhookHandler,
        order: NewPayment,
    }

    async fn fixture() -> Fixture {
        let db = Arc::new(InMemoryDatabase::new());
        let order = NewPayment::premium(
            UserId::from_uuid(Uuid::new_v4()),
            Amount::from_db(10_000),
            Timestamp::now(),
        );
        db.insert(&order).await.unwrap();
        let handler = HandlePaymentWebhookHandler::new(
            db.clone(),
            CallbackTokenVerifier::new(SecretString::new(TOKEN.to_string())),
        );
        Fixture { db, handler, order }
    }

    fn command(token: Option<&str>, body: Value) -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            callback_token: token.map(str::to_string),
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Authentication
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn wrong_or_missing_token_is_rejected() {
        let f = fixture().await;
        for token in [None, Some("nope"), Some("")] {
            let err = f
                .handler
                .handle(command(token, json!({ "status": "PAID" })))
                .await
                .unwrap_err();
            assert!(matches!(err, WebhookError::InvalidToken));
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(HandlePaymentWebhookCommand {
                callback_token: Some(TOKEN.into()),
                body: b"{not json".to_vec(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::ParseError(_)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Settlement
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn nested_paid_callback_grants_premium() {
        let f = fixture().await;
        let body = json!({
            "event": "qr.payment",
            "data": { "reference_id": f.order.order_id.as_str(), "status": "succeeded" }
        });

        let outcome = f.handler.handle(command(Some(TOKEN), body)).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Settled { user_id: f.order.user_id });
        let payment = f.db.find_by_order(&f.order.order_id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.raw_payload.unwrap()["event"], "qr.payment");
        let profile = ProfileRepository::find(f.db.as_ref(), &f.order.user_id)
            .await
            .unwrap()
            .unwrap();
        assert!(profile.is_premium);
    }

    #[tokio::test]
    async fn repeated_paid_callback_is_idempotent() {
        let f = fixture().await;
        let body = json!({ "reference_id": f.order.order_id.as_str(), "status": "PAID" });

        f.handler.handle(command(Some(TOKEN), body.clone())).await.unwrap();
        let since = ProfileRepository::find(f.db.as_ref(), &f.order.user_id)
            .await
            .unwrap()
            .unwrap()
            .premium_since;
        let outcome = f.handler.handle(command(Some(TOKEN), body)).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::AlreadyPaid { user_id: f.order.user_id });
        let after = ProfileRepository::find(f.db.as_ref(), &f.order.user_id)
            .await
            .unwrap()
            .unwrap()
            .premium_since;
        assert_eq!(since, after);
    }

    #[tokio::test]
    async fn paid_callback_for_unknown_order_is_acknowledged() {
        let f = fixture().await;
        let outcome = f
            .handler
            .handle(command(Some(TOKEN), json!({ "reference_id": "prem_other_1", "status": "PAID" })))
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::UnknownOrder);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Other statuses
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_reference_is_acknowledged() {
        let f = fixture().await;
        let outcome = f
            .handler
            .handle(command(Some(TOKEN), json!({ "status": "PAID" })))
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::NoReference);
    }

    #[tokio::test]
    async fn expiry_moves_pending_order() {
        let f = fixture().await;
        let body = json!({ "qr_code": { "reference_id": f.order.order_id.as_str() }, "status": "EXPIRED" });

        let outcome = f.handler.handle(command(Some(TOKEN), body)).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::StatusChanged { status: PaymentStatus::Expired });
    }

    #[tokio::test]
    async fn expiry_after_payment_changes_nothing() {
        let f = fixture().await;
        let id = f.order.order_id.as_str();
        f.handler
            .handle(command(Some(TOKEN), json!({ "reference_id": id, "status": "PAID" })))
            .await
            .unwrap();

        let outcome = f
            .handler
            .handle(command(Some(TOKEN), json!({ "reference_id": id, "status": "EXPIRED" })))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Acknowledged);
        let payment = f.db.find_by_order(&f.order.order_id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn unrecognised_status_is_acknowledged() {
        let f = fixture().await;
        let body = json!({ "reference_id": f.order.order_id.as_str(), "status": "ACTIVE" });
        let outcome = f.handler.handle(command(Some(TOKEN), body)).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::Acknowledged);
    }
}
