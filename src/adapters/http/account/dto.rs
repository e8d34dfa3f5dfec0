//! Request and response bodies for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::ports::SignUpOutcome;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
    /// A confirmation email was sent; the user signs in after confirming.
    pub confirmation_required: bool,
}

impl From<SignUpOutcome> for RegisterResponse {
    fn from(outcome: SignUpOutcome) -> Self {
        Self {
            user_id: outcome.user_id,
            confirmation_required: outcome.confirmation_required,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthParams {
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OAuthUrlResponse {
    pub url: String,
}
