//! Payment gateway port for QRIS code generation.
//!
//! The gateway returns a QR payload string the client renders; payment
//! confirmation arrives later through the callback endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::premium::{Amount, OrderId};

/// Dynamic QR code request for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeRequest {
    pub reference_id: OrderId,
    pub amount: Amount,
    pub currency: String,
}

/// Created QR code plus the raw gateway body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    pub id: Option<String>,
    pub qr_string: Option<String>,
    pub status: Option<String>,
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Gateway answered with a non-success status; `body` is its reply.
    #[error("Gateway rejected the request with status {status}")]
    Rejected { status: u16, body: Value },

    #[error("Gateway unreachable: {0}")]
    Network(String),
}

impl GatewayError {
    /// Body worth persisting on the payment row.
    pub fn payload(&self) -> Value {
        match self {
            GatewayError::Rejected { body, .. } => body.clone(),
            GatewayError::Network(message) => serde_json::json!({ "error": message }),
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_qr_code(&self, request: &QrCodeRequest) -> Result<QrCode, GatewayError>;
}
