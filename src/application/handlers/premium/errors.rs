//! Errors raised while creating a premium payment.

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Error)]
pub enum PremiumError {
    #[error("amount invalid (min {min})")]
    InvalidAmount { min: i64 },

    #[error("Account is already premium")]
    AlreadyPremium,

    /// The gateway refused or could not be reached; `detail` is its reply.
    #[error("Xendit create QR failed")]
    Gateway { detail: Value },

    #[error(transparent)]
    Domain(#[from] DomainError),
}
