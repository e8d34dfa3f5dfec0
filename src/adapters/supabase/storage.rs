//! Supabase Storage implementation of ObjectStorage.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use super::error_message;
use crate::domain::reading::public_image_url;
use crate::ports::{ObjectStorage, ObjectUpload, StorageError};

pub struct SupabaseObjectStorage {
    base_url: String,
    service_role_key: SecretString,
    http_client: reqwest::Client,
}

impl SupabaseObjectStorage {
    pub fn new(base_url: impl Into<String>, service_role_key: SecretString, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_role_key,
            http_client,
        }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.service_role_key.expose_secret();
        builder.header("apikey", key.as_str()).bearer_auth(key)
    }
}

async fn rejection(response: reqwest::Response) -> StorageError {
    let status = response.status();
    let message = error_message(&response.text().await.unwrap_or_default());
    if status == StatusCode::NOT_FOUND {
        StorageError::NotFound(message)
    } else {
        StorageError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upload(&self, object: ObjectUpload<'_>) -> Result<String, StorageError> {
        let response = self
            .authorized(self.http_client.post(self.object_url(object.bucket, object.path)))
            .header(reqwest::header::CONTENT_TYPE, object.content_type)
            .header("x-upsert", if object.upsert { "true" } else { "false" })
            .body(object.bytes.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let err = rejection(response).await;
            tracing::error!(bucket = object.bucket, path = object.path, error = %err, "Storage upload failed");
            return Err(err);
        }

        tracing::debug!(bucket = object.bucket, path = object.path, "Stored object");
        Ok(self.public_url(object.bucket, object.path))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        if paths.is_empty() {
            return Ok(());
        }
        let response = self
            .authorized(
                self.http_client
                    .delete(format!("{}/storage/v1/object/{}", self.base_url, bucket)),
            )
            .json(&json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
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

    fn storage() -> SupabaseObjectStorage {
        SupabaseObjectStorage::new(
            "https://demo.supabase.co/",
            SecretString::new("service".to_string()),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn object_url_joins_bucket_and_path() {
        assert_eq!(
            storage().object_url("avatars", "/u1/17.png"),
            "https://demo.supabase.co/storage/v1/object/avatars/u1/17.png"
        );
    }

    #[test]
    fn public_url_uses_public_endpoint() {
        assert_eq!(
            storage().public_url("covers", "covers/1-x.png"),
            "https://demo.supabase.co/storage/v1/object/public/covers/covers/1-x.png"
        );
    }

    #[tokio::test]
    async fn removing_nothing_skips_the_request() {
        assert!(storage().remove("avatars", &[]).await.is_ok());
    }
}
