//! Xendit QR Codes API implementation of PaymentGateway.
//!
//! # Security
//!
//! - HTTP Basic auth with the secret key as username and an empty password
//! - Secret key held as `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = XenditConfig::new(secret_key).with_base_url("https://api.xendit.co");
//! let gateway = XenditQrGateway::new(config, reqwest::Client::new());
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::ports::{GatewayError, PaymentGateway, QrCode, QrCodeRequest};

const DEFAULT_API_BASE_URL: &str = "https://api.xendit.co";
const DEFAULT_API_VERSION: &str = "2022-07-31";

/// Xendit API configuration.
#[derive(Clone)]
pub struct XenditConfig {
    /// Secret API key (xnd_development_... or xnd_production_...).
    secret_key: SecretString,

    api_base_url: String,

    /// Value of the `api-version` header.
    api_version: String,
}

impl XenditConfig {
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
}

impl std::fmt::Debug for XenditConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XenditConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /qr_codes`.
#[derive(Debug, Serialize)]
struct CreateQrBody<'a> {
    reference_id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    currency: &'a str,
    amount: i64,
}

impl<'a> From<&'a QrCodeRequest> for CreateQrBody<'a> {
    fn from(request: &'a QrCodeRequest) -> Self {
        Self {
            reference_id: request.reference_id.as_str(),
            kind: "DYNAMIC",
            currency: &request.currency,
            amount: request.amount.value(),
        }
    }
}

/// Pulls the fields the client needs out of a QR code response.
fn qr_from_body(raw: Value) -> QrCode {
    let field = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
    let (id, qr_string, status) = (field("id"), field("qr_string"), field("status"));
    QrCode {
        id,
        qr_string,
        status,
        raw,
    }
}

#[derive(Debug)]
pub struct XenditQrGateway {
    config: XenditConfig,
    http_client: reqwest::Client,
}

impl XenditQrGateway {
    pub fn new(config: XenditConfig, http_client: reqwest::Client) -> Self {
        Self { config, http_client }
    }
}

#[async_trait]
impl PaymentGateway for XenditQrGateway {
    async fn create_qr_code(&self, request: &QrCodeRequest) -> Result<QrCode, GatewayError> {
        let url = format!("{}/qr_codes", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.secret_key.expose_secret(), Some(""))
            .header("api-version", &self.config.api_version)
            .json(&CreateQrBody::from(request))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if !status.is_success() {
            tracing::error!(
                reference_id = %request.reference_id,
                status = status.as_u16(),
                body = %body,
                "Xendit create QR failed"
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(reference_id = %request.reference_id, "Xendit QR code created");
        Ok(qr_from_body(body))
    }
}
