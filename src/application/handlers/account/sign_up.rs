//! SignUpHandler - Command handler for account registration.

use std::sync::Arc;

use crate::domain::account::Credentials;
use crate::domain::foundation::DomainError;
use crate::ports::{IdentityProvider, SignUpOutcome};

#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub email: String,
    pub password: String,
    /// Stored as the account's display name.
    pub username: Option<String>,
}

pub struct SignUpHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl SignUpHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignUpOutcome, DomainError> {
        let credentials = Credentials::new(&cmd.email, &cmd.password)?;
        let username = cmd
            .username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let outcome = self.identity.sign_up(&credentials, username).await?;
        tracing::info!(
            user_id = %outcome.user_id,
            confirmation_required = outcome.confirmation_required,
            "User registered"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdentityProvider;
    use crate::domain::foundation::ErrorCode;

    fn command(username: Option<&str>) -> SignUpCommand {
        SignUpCommand {
            email: "new@example.com".into(),
            password: "hunter22".into(),
            username: username.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn username_becomes_display_name() {
        let idp = Arc::new(InMemoryIdentityProvider::new());
        let handler = SignUpHandler::new(idp.clone());

        let outcome = handler.handle(command(Some("  inkreader "))).await.unwrap();

        let record = idp.record(&outcome.user_id).await.unwrap();
        assert_eq!(record.display_name(), "inkreader");
    }

    #[tokio::test]
    async fn blank_username_falls_back_to_email() {
        let idp = Arc::new(InMemoryIdentityProvider::new());
        let handler = SignUpHandler::new(idp.clone());

        let outcome = handler.handle(command(Some("   "))).await.unwrap();

        let record = idp.record(&outcome.user_id).await.unwrap();
        assert_eq!(record.display_name(), "new");
    }

    #[tokio::test]
    async fn confirmation_flag_is_passed_through() {
        let idp = Arc::new(InMemoryIdentityProvider::new().requiring_confirmation());
        let outcome = SignUpHandler::new(idp).handle(command(None)).await.unwrap();
        assert!(outcome.confirmation_required);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_provider_error() {
        let handler = SignUpHandler::new(Arc::new(InMemoryIdentityProvider::new()));
        handler.handle(command(None)).await.unwrap();

        let err = handler.handle(command(None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthProviderError);
    }
}
