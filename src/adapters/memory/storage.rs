//! In-memory object storage for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::reading::public_image_url;
use crate::ports::{ObjectStorage, ObjectUpload, StorageError};

/// Stored object bytes and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: Arc<RwLock<HashMap<(String, String), StoredObject>>>,
    unavailable: bool,
}

impl InMemoryObjectStorage {
    /// Public URLs are built under `base_url` like Supabase's.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            unavailable: false,
        }
    }

    /// Every call fails with `StorageError::Unavailable`.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub async fn get(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        let key = (bucket.to_string(), path.to_string());
        self.objects.read().await.get(&key).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage offline".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new("http://storage.test")
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(&self, object: ObjectUpload<'_>) -> Result<String, StorageError> {
        self.check_available()?;
        let key = (object.bucket.to_string(), object.path.to_string());
        let mut objects = self.objects.write().await;
        if !object.upsert && objects.contains_key(&key) {
            return Err(StorageError::Rejected {
                status: 409,
                message: "The resource already exists".to_string(),
            });
        }
        objects.insert(
            key,
            StoredObject {
                content_type: object.content_type.to_string(),
                bytes: object.bytes.to_vec(),
            },
        );
        Ok(self.public_url(object.bucket, object.path))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        self.check_available()?;
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_image_url(&self.base_url, bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload<'a>(path: &'a str, upsert: bool) -> ObjectUpload<'a> {
        ObjectUpload {
            bucket: "avatars",
            path,
            content_type: "image/png",
            bytes: b"png",
            upsert,
        }
    }

    #[tokio::test]
    async fn upload_returns_public_url() {
        let storage = InMemoryObjectStorage::default();
        let url = storage.upload(upload("u/1.png", false)).await.unwrap();
        assert_eq!(url, "http://storage.test/storage/v1/object/public/avatars/u/1.png");
        assert!(storage.get("avatars", "u/1.png").await.is_some());
    }

    #[tokio::test]
    async fn existing_path_needs_upsert() {
        let storage = InMemoryObjectStorage::default();
        storage.upload(upload("u/1.png", false)).await.unwrap();

        let err = storage.upload(upload("u/1.png", false)).await.unwrap_err();
        assert!(matches!(err, StorageError::Rejected { status: 409, .. }));
        assert!(storage.upload(upload("u/1.png", true)).await.is_ok());
    }

    #[tokio::test]
    async fn remove_ignores_missing_paths() {
        let storage = InMemoryObjectStorage::default();
        storage.upload(upload("u/1.png", false)).await.unwrap();
        storage
            .remove("avatars", &["u/1.png".to_string(), "u/none.png".to_string()])
            .await
            .unwrap();
        assert_eq!(storage.object_count().await, 0);
    }
}
