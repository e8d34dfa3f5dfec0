//! OAuthUrlHandler - Query handler for the social login buttons.

use std::sync::Arc;

use crate::domain::account::OAuthProvider;
use crate::domain::foundation::DomainError;
use crate::ports::IdentityProvider;

#[derive(Debug, Clone)]
pub struct OAuthUrlQuery {
    pub provider: String,
    pub redirect_to: Option<String>,
}

pub struct OAuthUrlHandler {
    identity: Arc<dyn IdentityProvider>,
    /// Used when the caller gives no `redirect_to`.
    default_redirect: String,
}

impl OAuthUrlHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, default_redirect: impl Into<String>) -> Self {
        Self {
            identity,
            default_redirect: default_redirect.into(),
        }
    }

    pub fn handle(&self, query: OAuthUrlQuery) -> Result<String, DomainError> {
        let provider: OAuthProvider = query.provider.parse()?;
        let redirect_to = query
            .redirect_to
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_redirect);
        Ok(self.identity.authorize_url(provider, redirect_to))
    }
}
