//! Supabase access-token validation.
//!
//! Supabase signs user access tokens with the project's JWT secret (HS256),
//! so tokens are verified locally without a round trip to GoTrue:
//!
//! 1. Signature against the shared secret
//! 2. Audience (`authenticated` by default)
//! 3. Expiry
//! 4. `sub` parsed as the user's UUID
//!
//! # Example
//!
//! ```ignore
//! let validator = SupabaseJwtValidator::new(&config.auth.jwt_secret, &config.auth.audience);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims Supabase puts in a user access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl SupabaseClaims {
    fn display_name(&self) -> Option<String> {
        ["display_name", "full_name", "name"]
            .iter()
            .find_map(|k| self.user_metadata.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// `SessionValidator` backed by the project's JWT secret.
pub struct SupabaseJwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SupabaseJwtValidator {
    pub fn new(jwt_secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    fn validate_token(&self, token: &str) -> Result<TokenData<SupabaseClaims>, AuthError> {
        decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl SessionValidator for SupabaseJwtValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.validate_token(token)?.claims;

        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let display_name = claims.display_name();
        Ok(AuthenticatedUser::new(
            user_id,
            claims.email.unwrap_or_default(),
            display_name,
        ))
    }
}

impl std::fmt::Debug for SupabaseJwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseJwtValidator")
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}
