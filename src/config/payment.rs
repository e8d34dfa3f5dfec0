//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Xendit QRIS)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Xendit secret API key, sent as the basic-auth username
    pub xendit_secret_key: String,

    /// Shared token Xendit sends in `x-callback-token`
    pub callback_token: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value of the `api-version` header on QR code requests
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Premium price charged when the client sends no amount
    #[serde(default = "default_amount")]
    pub default_amount: i64,

    #[serde(default = "default_min_amount")]
    pub min_amount: i64,

    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Check if using a Xendit development key
    pub fn is_test_mode(&self) -> bool {
        self.xendit_secret_key.starts_with("xnd_development_")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.xendit_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("XENDIT_SECRET_KEY"));
        }
        if self.callback_token.is_empty() {
            return Err(ValidationError::MissingRequired("XENDIT_CALLBACK_TOKEN"));
        }
        if !self.xendit_secret_key.starts_with("xnd_") {
            return Err(ValidationError::InvalidXenditKey);
        }
        if self.min_amount <= 0 || self.default_amount < self.min_amount {
            return Err(ValidationError::InvalidPaymentAmount);
        }
        if self.currency.len() != 3 {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            xendit_secret_key: String::new(),
            callback_token: String::new(),
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            default_amount: default_amount(),
            min_amount: default_min_amount(),
            currency: default_currency(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.xendit.co".to_string()
}

fn default_api_version() -> String {
    "2022-07-31".to_string()
}

fn default_amount() -> i64 {
    10_000
}

fn default_min_amount() -> i64 {
    1_000
}

fn default_currency() -> String {
    "IDR".to_string()
}
