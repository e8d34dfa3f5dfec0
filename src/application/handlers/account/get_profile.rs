//! GetProfileHandler - Query handler for the profile page.

use std::sync::Arc;

use crate::domain::account::{Profile, ProfileView};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{IdentityProvider, ProfileRepository};

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { identity, profiles }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<ProfileView, DomainError> {
        let record = self.identity.get_user(&query.user_id).await?;
        let profile = load_profile(self.profiles.as_ref(), &query.user_id).await?;
        Ok(ProfileView::assemble(&record, &profile))
    }
}

/// Stored profile, or a regular non-premium one when there is no row.
pub(crate) async fn load_profile(
    profiles: &dyn ProfileRepository,
    user_id: &UserId,
) -> Result<Profile, DomainError> {
    Ok(profiles
        .find(user_id)
        .await?
        .unwrap_or_else(|| Profile::regular(*user_id)))
}
