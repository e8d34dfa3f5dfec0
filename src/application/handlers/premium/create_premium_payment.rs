//! CreatePremiumPaymentHandler - Command handler that opens a QRIS order.
//!
//! The payment row is written as `pending` before the gateway call so a
//! callback can never arrive for an order we do not know. Whatever the
//! gateway answers is stored on the row.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{ErrorCode, Timestamp, UserId};
use crate::domain::premium::{Amount, NewPayment, OrderId, Payment};
use crate::ports::{PaymentGateway, PaymentRepository, ProfileRepository, QrCodeRequest};

use super::errors::PremiumError;

const ORDER_ID_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct CreatePremiumPaymentCommand {
    pub user_id: UserId,
    /// Requested amount in rupiah; the configured default when absent.
    pub amount: Option<f64>,
}

/// QR code the client renders for the user to scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedPayment {
    pub order_id: OrderId,
    pub amount: Amount,
    pub qr_string: Option<String>,
    pub xendit_qr_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub default_amount: i64,
    pub min_amount: i64,
    pub currency: String,
}

pub struct CreatePremiumPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    profiles: Arc<dyn ProfileRepository>,
    gateway: Arc<dyn PaymentGateway>,
    settings: PaymentSettings,
}

impl CreatePremiumPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        profiles: Arc<dyn ProfileRepository>,
        gateway: Arc<dyn PaymentGateway>,
        settings: PaymentSettings,
    ) -> Self {
        Self {
            payments,
            profiles,
            gateway,
            settings,
        }
    }

    pub async fn handle(&self, cmd: CreatePremiumPaymentCommand) -> Result<CreatedPayment, PremiumError> {
        // 1. Validate amount
        let amount = Amount::resolve(cmd.amount, self.settings.default_amount, self.settings.min_amount)
            .map_err(|_| PremiumError::InvalidAmount {
                min: self.settings.min_amount,
            })?;

        // 2. Premium is permanent; never charge twice
        if let Some(profile) = self.profiles.find(&cmd.user_id).await? {
            if profile.is_premium {
                return Err(PremiumError::AlreadyPremium);
            }
        }

        // 3. Record the pending order
        let payment = self.insert_pending(cmd.user_id, amount).await?;
        let order_id = payment.order_id;

        // 4. Ask the gateway for a QR code
        let request = QrCodeRequest {
            reference_id: order_id.clone(),
            amount,
            currency: self.settings.currency.clone(),
        };
        match self.gateway.create_qr_code(&request).await {
            Ok(qr) => {
                self.store_payload(&order_id, &qr.raw).await;
                tracing::info!(order_id = %order_id, amount = amount.value(), "Premium QR created");
                Ok(CreatedPayment {
                    order_id,
                    amount,
                    qr_string: qr.qr_string,
                    xendit_qr_id: qr.id,
                    status: qr.status,
                })
            }
            Err(e) => {
                let detail = e.payload();
                self.store_payload(&order_id, &detail).await;
                tracing::warn!(order_id = %order_id, error = %e, "Gateway refused QR creation");
                Err(PremiumError::Gateway { detail })
            }
        }
    }

    /// Order ids carry a millisecond timestamp; a collision with an order
    /// created in the same millisecond moves on to the next one.
    async fn insert_pending(&self, user_id: UserId, amount: Amount) -> Result<Payment, PremiumError> {
        let mut at = Timestamp::now();
        let mut attempt = 1;
        loop {
            match self.payments.insert(&NewPayment::premium(user_id, amount, at)).await {
                Err(e) if e.code == ErrorCode::DuplicateOrder && attempt < ORDER_ID_ATTEMPTS => {
                    tracing::debug!(error = %e, attempt, "Order id taken, retrying");
                    at = at.add_millis(1);
                    attempt += 1;
                }
                result => return Ok(result?),
            }
        }
    }

    /// The gateway reply is kept for debugging; failing to store it does not
    /// change the outcome.
    async fn store_payload(&self, order_id: &OrderId, payload: &serde_json::Value) {
        if let Err(e) = self.payments.attach_payload(order_id, payload).await {
            tracing::warn!(order_id = %order_id, error = %e, "Failed to store gateway payload");
        }
    }
}
