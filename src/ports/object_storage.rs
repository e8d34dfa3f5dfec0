//! Object storage port for public image buckets.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// A file to write into a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUpload<'a> {
    pub bucket: &'a str,
    pub path: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
    /// Overwrite an existing object at the same path.
    pub upsert: bool,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store the object and return its public URL.
    async fn upload(&self, object: ObjectUpload<'_>) -> Result<String, StorageError>;

    /// Remove objects; missing paths are not an error.
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;

    /// Public URL of an object, whether or not it exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
