//! In-memory identity provider for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::account::{
    AuthSession, Credentials, IdentityRecord, Metadata, MetadataPatch, OAuthProvider,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{IdentityProvider, SignUpOutcome};

#[derive(Debug, Default)]
struct Accounts {
    passwords: HashMap<String, (String, UserId)>,
    records: HashMap<UserId, IdentityRecord>,
}

/// Accounts kept in a map; passwords compared in plain text.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Arc<RwLock<Accounts>>,
    confirm_email: bool,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-ups report that a confirmation email was sent.
    pub fn requiring_confirmation(mut self) -> Self {
        self.confirm_email = true;
        self
    }

    /// Store a user record without credentials (e.g. an OAuth account).
    pub async fn put_record(&self, record: IdentityRecord) {
        self.accounts.write().await.records.insert(record.id, record);
    }

    pub async fn record(&self, user_id: &UserId) -> Option<IdentityRecord> {
        self.accounts.read().await.records.get(user_id).cloned()
    }
}

fn provider_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::AuthProviderError, message)
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, DomainError> {
        let accounts = self.accounts.read().await;
        match accounts.passwords.get(&credentials.email.to_lowercase()) {
            Some((password, user_id)) if *password == credentials.password => Ok(AuthSession {
                access_token: format!("access-{}", user_id),
                refresh_token: format!("refresh-{}", user_id),
                token_type: "bearer".to_string(),
                expires_in: 3600,
                user_id: *user_id,
            }),
            _ => Err(DomainError::new(
                ErrorCode::InvalidCredentials,
                "Invalid login credentials",
            )),
        }
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> Result<SignUpOutcome, DomainError> {
        let mut accounts = self.accounts.write().await;
        let key = credentials.email.to_lowercase();
        if accounts.passwords.contains_key(&key) {
            return Err(provider_error("User already registered"));
        }

        let user_id = UserId::from_uuid(Uuid::new_v4());
        let mut user_metadata = Metadata::new();
        if let Some(name) = display_name {
            user_metadata.insert("display_name".into(), Value::String(name.to_string()));
        }
        let mut app_metadata = Metadata::new();
        app_metadata.insert("provider".into(), Value::String("email".into()));

        accounts
            .passwords
            .insert(key, (credentials.password.clone(), user_id));
        accounts.records.insert(
            user_id,
            IdentityRecord {
                id: user_id,
                email: Some(credentials.email.clone()),
                user_metadata,
                app_metadata,
                identities: Vec::new(),
            },
        );
        Ok(SignUpOutcome {
            user_id,
            confirmation_required: self.confirm_email,
        })
    }

    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        format!(
            "memory://authorize?provider={}&redirect_to={}",
            provider.as_str(),
            redirect_to
        )
    }

    async fn get_user(&self, user_id: &UserId) -> Result<IdentityRecord, DomainError> {
        self.accounts
            .read()
            .await
            .records
            .get(user_id)
            .cloned()
            .ok_or_else(|| provider_error("User not found"))
    }

    async fn update_metadata(
        &self,
        user_id: &UserId,
        patch: &MetadataPatch,
    ) -> Result<IdentityRecord, DomainError> {
        let mut accounts = self.accounts.write().await;
        let record = accounts
            .records
            .get_mut(user_id)
            .ok_or_else(|| provider_error("User not found"))?;

        if let Ok(Value::Object(fields)) = serde_json::to_value(patch) {
            record.user_metadata.extend(fields);
        }
        Ok(record.clone())
    }
}
