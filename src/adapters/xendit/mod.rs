//! Xendit adapters.
//!
//! `XenditQrGateway` creates dynamic QRIS codes through the QR Codes API.
//! Callbacks are authenticated by token, see `domain::premium::CallbackTokenVerifier`.

mod qr_gateway;

pub use qr_gateway::{XenditConfig, XenditQrGateway};
