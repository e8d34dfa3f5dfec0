//! Premium domain - QRIS payments and the callbacks that settle them.

mod errors;
mod payment;
mod webhook;

pub use errors::WebhookError;
pub use payment::{
    Amount, NewPayment, OrderId, Payment, PaymentStatus, PaymentSummary, PROVIDER_XENDIT,
    RECENT_PAYMENTS_LIMIT,
};
pub use webhook::{classify_status, CallbackEvent, CallbackTokenVerifier, CALLBACK_TOKEN_HEADER};
