//! UpdateProfileHandler - Command handler for the profile edit form.
//!
//! A new avatar replaces the previous upload: the old object is removed
//! (best effort), the new one stored under `{user_id}/{unix_millis}.{ext}`,
//! and both its URL and path written to the user's metadata.

use std::sync::Arc;

use crate::domain::account::{
    avatar_object_path, validate_avatar, MetadataPatch, ProfileView, UploadedFile,
};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{IdentityProvider, ObjectStorage, ObjectUpload, ProfileRepository};

use super::get_profile::load_profile;

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub struct AvatarSettings {
    pub bucket: String,
    pub max_bytes: usize,
}

pub struct UpdateProfileHandler {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    storage: Arc<dyn ObjectStorage>,
    settings: AvatarSettings,
}

impl UpdateProfileHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        storage: Arc<dyn ObjectStorage>,
        settings: AvatarSettings,
    ) -> Self {
        Self {
            identity,
            profiles,
            storage,
            settings,
        }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfileView, DomainError> {
        // 1. Reject bad files before any side effect
        if let Some(file) = &cmd.avatar {
            validate_avatar(file, self.settings.max_bytes)
                .map_err(|e| DomainError::validation("avatar", e.reason()))?;
        }

        let mut patch = MetadataPatch::new(cmd.display_name.as_deref(), cmd.bio.as_deref());

        // 2. Swap the avatar object
        if let Some(file) = &cmd.avatar {
            let current = self.identity.get_user(&cmd.user_id).await?;
            if let Some(old_path) = current.custom_avatar_path() {
                if let Err(e) = self.storage.remove(&self.settings.bucket, &[old_path]).await {
                    tracing::warn!(user_id = %cmd.user_id, error = %e, "Failed to remove old avatar");
                }
            }

            let path = avatar_object_path(&cmd.user_id, Timestamp::now(), file);
            let url = self
                .storage
                .upload(ObjectUpload {
                    bucket: &self.settings.bucket,
                    path: &path,
                    content_type: &file.content_type,
                    bytes: &file.bytes,
                    upsert: true,
                })
                .await?;
            patch = patch.with_avatar(url, path);
        }

        // 3. Write metadata and return the refreshed view
        let record = self.identity.update_metadata(&cmd.user_id, &patch).await?;
        let profile = load_profile(self.profiles.as_ref(), &cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, avatar = cmd.avatar.is_some(), "Profile updated");

        Ok(ProfileView::assemble(&record, &profile))
    }
}
