//! Mock payment gateway for testing.
//!
//! Supports:
//! - Canned QR responses derived from the order reference
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{GatewayError, PaymentGateway, QrCode, QrCodeRequest};

#[derive(Debug, Default)]
struct MockState {
    next_error: Option<GatewayError>,
    requests: Vec<QrCodeRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `error` until cleared.
    pub fn set_error(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    pub fn clear_error(&self) {
        self.inner.lock().unwrap().next_error = None;
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<QrCodeRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_qr_code(&self, request: &QrCodeRequest) -> Result<QrCode, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.requests.push(request.clone());
        if let Some(error) = state.next_error.clone() {
            return Err(error);
        }

        let id = format!("qr_{}", request.reference_id);
        let qr_string = format!("00020101021226{}5303360", request.reference_id);
        let raw: Value = json!({
            "id": id,
            "reference_id": request.reference_id.as_str(),
            "type": "DYNAMIC",
            "currency": request.currency,
            "amount": request.amount.value(),
            "status": "ACTIVE",
            "qr_string": qr_string,
        });
        Ok(QrCode {
            id: Some(id),
            qr_string: Some(qr_string),
            status: Some("ACTIVE".to_string()),
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::premium::{Amount, OrderId};

    fn request() -> QrCodeRequest {
        QrCodeRequest {
            reference_id: OrderId::parse("prem_abc_1").unwrap(),
            amount: Amount::from_db(10_000),
            currency: "IDR".to_string(),
        }
    }

    #[tokio::test]
    async fn canned_qr_echoes_reference() {
        let gateway = MockPaymentGateway::new();
        let qr = gateway.create_qr_code(&request()).await.unwrap();

        assert_eq!(qr.id.as_deref(), Some("qr_prem_abc_1"));
        assert_eq!(qr.raw["amount"], 10_000);
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn injected_error_is_returned_and_call_logged() {
        let gateway = MockPaymentGateway::new();
        gateway.set_error(GatewayError::Network("timeout".into()));

        assert!(gateway.create_qr_code(&request()).await.is_err());
        assert_eq!(gateway.requests().len(), 1);
    }
}
