//! HTTP adapter for the QRIS premium upgrade.
//!
//! - `POST /api/payments/create` - Open a QR payment for the caller
//! - `POST /api/payments/webhook` - Xendit callback, checked by `x-callback-token`
//! - `GET /api/premium` - Caller's premium flag and recent payments
//!
//! These routes answer errors with `{error, detail?}` bodies, the contract
//! the payment page and the Xendit dashboard expect.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::premium_routes;
