//! Object storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase Storage configuration
///
/// Uploads use the service role key; reads go through the public
/// `/storage/v1/object/public/{bucket}/{path}` URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Service role key used for uploads and removals
    pub service_role_key: String,

    /// Bucket for comic covers
    #[serde(default = "default_covers_bucket")]
    pub covers_bucket: String,

    /// Bucket for user avatars
    #[serde(default = "default_avatars_bucket")]
    pub avatars_bucket: String,

    /// Bucket for chapter page images
    #[serde(default = "default_pages_bucket")]
    pub pages_bucket: String,

    /// Largest accepted avatar upload
    #[serde(default = "default_max_avatar_bytes")]
    pub max_avatar_bytes: usize,

    /// Largest accepted request body for uploads
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_role_key.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_SERVICE_ROLE_KEY"));
        }
        for bucket in [&self.covers_bucket, &self.avatars_bucket, &self.pages_bucket] {
            if bucket.trim().is_empty() {
                return Err(ValidationError::MissingRequired("STORAGE_BUCKET"));
            }
        }
        if self.max_avatar_bytes == 0 || self.max_avatar_bytes > self.max_upload_bytes {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            service_role_key: String::new(),
            covers_bucket: default_covers_bucket(),
            avatars_bucket: default_avatars_bucket(),
            pages_bucket: default_pages_bucket(),
            max_avatar_bytes: default_max_avatar_bytes(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_covers_bucket() -> String {
    "covers".to_string()
}

fn default_avatars_bucket() -> String {
    "avatars".to_string()
}

fn default_pages_bucket() -> String {
    "manga_pages".to_string()
}

fn default_max_avatar_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}
