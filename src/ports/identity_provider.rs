//! Identity provider port (accounts, sign-in and user metadata).
//!
//! Implemented by the Supabase GoTrue adapter. Errors use
//! `ErrorCode::InvalidCredentials` for rejected sign-ins and
//! `ErrorCode::AuthProviderError` for everything else the provider reports.

use async_trait::async_trait;

use crate::domain::account::{AuthSession, Credentials, IdentityRecord, MetadataPatch, OAuthProvider};
use crate::domain::foundation::{DomainError, UserId};

/// Outcome of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user_id: UserId,
    /// The provider sent a confirmation email instead of a session.
    pub confirmation_required: bool,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Email/password sign-in.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, DomainError>;

    /// Create an account; `display_name` is stored in user metadata.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> Result<SignUpOutcome, DomainError>;

    /// URL the browser follows to start an OAuth sign-in.
    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String;

    /// Full user record including identities.
    async fn get_user(&self, user_id: &UserId) -> Result<IdentityRecord, DomainError>;

    /// Merge `patch` into the user's metadata and return the updated record.
    async fn update_metadata(
        &self,
        user_id: &UserId,
        patch: &MetadataPatch,
    ) -> Result<IdentityRecord, DomainError>;
}
