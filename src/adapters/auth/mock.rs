//! Mock session validator for testing.
//!
//! Maps fixed bearer tokens to users so HTTP tests can authenticate without
//! minting real Supabase tokens.
//!
//! # Example
//!
//! ```ignore
//! use fluxinkverse::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_reader("reader-token");
//! let user = validator.validate("reader-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Tokens not in the table return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as `user`.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Accept `token` as a freshly generated reader.
    pub fn with_reader(self, token: impl Into<String>) -> Self {
        let token = token.into();
        let user = AuthenticatedUser::new(
            UserId::from_uuid(Uuid::new_v4()),
            format!("{}@reader.test", token),
            None,
        );
        self.with_user(token, user)
    }

    /// Every validation fails with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// User behind `token`, if registered.
    pub fn user_for(&self, token: &str) -> Option<AuthenticatedUser> {
        self.tokens.read().unwrap().get(token).cloned()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        self.user_for(token).ok_or(AuthError::InvalidToken)
    }
}
