//! Profile repository port (role and premium flags).

use async_trait::async_trait;

use crate::domain::account::Profile;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// `None` when the user has no profile row yet.
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;
}
