//! Supabase Auth (GoTrue) implementation of IdentityProvider.
//!
//! Public endpoints use the anon key; user reads and metadata updates go
//! through the admin API with the service role key, since the backend acts
//! on behalf of an already-authenticated caller.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use super::error_message;
use crate::domain::account::{AuthSession, Credentials, IdentityRecord, MetadataPatch, OAuthProvider};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{IdentityProvider, SignUpOutcome};

pub struct SupabaseIdentityProvider {
    base_url: String,
    anon_key: String,
    service_role_key: SecretString,
    http_client: reqwest::Client,
}

/// Session body of `/token?grant_type=password` and, when no
/// confirmation is needed, `/signup`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
    user: UserRef,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct UserRef {
    id: UserId,
}

/// `/signup` answers with a session, or with the bare user when an email
/// confirmation was sent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session {
        access_token: String,
        user: UserRef,
    },
    User {
        id: UserId,
    },
}

impl SignUpResponse {
    fn outcome(self) -> SignUpOutcome {
        match self {
            SignUpResponse::Session { user, .. } => SignUpOutcome {
                user_id: user.id,
                confirmation_required: false,
            },
            SignUpResponse::User { id } => SignUpOutcome {
                user_id: id,
                confirmation_required: true,
            },
        }
    }
}

fn provider_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::AuthProviderError, message)
}

impl SupabaseIdentityProvider {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        service_role_key: SecretString,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_role_key,
            http_client,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn admin_request(&self, method: reqwest::Method, user_id: &UserId) -> reqwest::RequestBuilder {
        let key = self.service_role_key.expose_secret();
        self.http_client
            .request(method, self.auth_url(&format!("admin/users/{}", user_id)))
            .header("apikey", key.as_str())
            .bearer_auth(key)
    }

    async fn read_record(response: reqwest::Response, action: &str) -> Result<IdentityRecord, DomainError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %body, "Supabase {} failed", action);
            return Err(provider_error(error_message(&body)));
        }
        response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse Supabase user: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, DomainError> {
        let response = self
            .http_client
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": credentials.email, "password": credentials.password }))
            .send()
            .await
            .map_err(|e| provider_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            let code = if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
                ErrorCode::InvalidCredentials
            } else {
                tracing::error!(status = %status, error = %message, "Supabase sign-in failed");
                ErrorCode::AuthProviderError
            };
            return Err(DomainError::new(code, message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse Supabase session: {}", e)))?;

        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user_id: token.user.id,
        })
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> Result<SignUpOutcome, DomainError> {
        let mut body = json!({ "email": credentials.email, "password": credentials.password });
        if let Some(name) = display_name {
            body["data"] = json!({ "display_name": name });
        }

        let response = self
            .http_client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| provider_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            tracing::warn!(status = %status, error = %message, "Supabase sign-up rejected");
            return Err(provider_error(message));
        }

        let parsed: SignUpResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse Supabase sign-up: {}", e)))?;
        Ok(parsed.outcome())
    }

    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        let base = self.auth_url("authorize");
        Url::parse_with_params(&base, &[("provider", provider.as_str()), ("redirect_to", redirect_to)])
            .map(String::from)
            .unwrap_or(base)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<IdentityRecord, DomainError> {
        let response = self
            .admin_request(reqwest::Method::GET, user_id)
            .send()
            .await
            .map_err(|e| provider_error(e.to_string()))?;
        Self::read_record(response, "get user").await
    }

    async fn update_metadata(
        &self,
        user_id: &UserId,
        patch: &MetadataPatch,
    ) -> Result<IdentityRecord, DomainError> {
        let response = self
            .admin_request(reqwest::Method::PUT, user_id)
            .json(&json!({ "user_metadata": patch }))
            .send()
            .await
            .map_err(|e| provider_error(e.to_string()))?;
        Self::read_record(response, "update user").await
    }
}

impl std::fmt::Debug for SupabaseIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseIdentityProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
