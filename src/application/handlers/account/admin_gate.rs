//! AdminGate - role check in front of every admin operation.

use std::sync::Arc;

use crate::domain::account::Profile;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::ProfileRepository;

pub struct AdminGate {
    profiles: Arc<dyn ProfileRepository>,
}

impl AdminGate {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// The caller's profile when it carries the admin role; `Forbidden`
    /// for regular users and users without a profile row.
    pub async fn require_admin(&self, user_id: &UserId) -> Result<Profile, DomainError> {
        match self.profiles.find(user_id).await? {
            Some(profile) if profile.is_admin() => Ok(profile),
            _ => {
                tracing::debug!(user_id = %user_id, "Admin access denied");
                Err(DomainError::new(ErrorCode::Forbidden, "Admin access required"))
            }
        }
    }
}
