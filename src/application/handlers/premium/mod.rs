//! Premium handlers.
//!
//! ## Commands
//! - Open a QRIS order for the premium upgrade
//! - Process gateway callbacks
//!
//! ## Queries
//! - Premium status with recent payments

mod create_premium_payment;
mod errors;
mod get_premium_status;
mod handle_payment_webhook;

pub use errors::PremiumError;

// Commands
pub use create_premium_payment::{
    CreatePremiumPaymentCommand, CreatePremiumPaymentHandler, CreatedPayment, PaymentSettings,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};

// Queries
pub use get_premium_status::{GetPremiumStatusHandler, GetPremiumStatusQuery, PremiumStatus};
