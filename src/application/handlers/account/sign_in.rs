//! SignInHandler - Command handler for email/password login.

use std::sync::Arc;

use crate::domain::account::{AuthSession, Credentials};
use crate::domain::foundation::DomainError;
use crate::ports::IdentityProvider;

#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

pub struct SignInHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl SignInHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<AuthSession, DomainError> {
        let credentials = Credentials::new(&cmd.email, &cmd.password)?;
        let session = self.identity.sign_in(&credentials).await?;
        tracing::info!(user_id = %session.user_id, "User signed in");
        Ok(session)
    }
}
