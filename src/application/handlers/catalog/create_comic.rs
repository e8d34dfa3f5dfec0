//! CreateComicHandler - Command handler for the admin "insert comic" form.

use std::sync::Arc;

use crate::domain::account::{cover_object_path, validate_avatar, UploadedFile};
use crate::domain::catalog::{Comic, NewComic};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{ComicRepository, ObjectStorage, ObjectUpload};

const REQUIRED_MESSAGE: &str = "Title and cover image are required.";

/// Form fields of a new comic. Text fields arrive untrimmed.
#[derive(Debug, Clone, Default)]
pub struct CreateComicCommand {
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub last_chapter: i32,
    pub genres: Vec<String>,
    pub cover: Option<UploadedFile>,
}

/// Where covers go and how large they may be.
#[derive(Debug, Clone)]
pub struct CoverSettings {
    pub bucket: String,
    pub max_bytes: usize,
}

pub struct CreateComicHandler {
    comics: Arc<dyn ComicRepository>,
    storage: Arc<dyn ObjectStorage>,
    settings: CoverSettings,
}

impl CreateComicHandler {
    pub fn new(
        comics: Arc<dyn ComicRepository>,
        storage: Arc<dyn ObjectStorage>,
        settings: CoverSettings,
    ) -> Self {
        Self {
            comics,
            storage,
            settings,
        }
    }

    pub async fn handle(&self, cmd: CreateComicCommand) -> Result<Comic, DomainError> {
        // 1. Title and cover are both mandatory
        let cover = match cmd.cover {
            Some(cover) if !cmd.title.trim().is_empty() => cover,
            _ => return Err(DomainError::validation("title", REQUIRED_MESSAGE)),
        };
        validate_avatar(&cover, self.settings.max_bytes)
            .map_err(|e| DomainError::validation("cover", e.reason()))?;

        // 2. Validate the rest before touching storage
        let mut comic = NewComic::new(
            &cmd.title,
            cmd.description.as_deref(),
            cmd.author.as_deref(),
            cmd.last_chapter,
            &cmd.genres,
            String::new(),
        )?;
        comic.slug = self.unique_slug(&comic.slug).await?;

        // 3. Upload the cover
        let path = cover_object_path(Timestamp::now(), &cover);
        comic.cover_url = self
            .storage
            .upload(ObjectUpload {
                bucket: &self.settings.bucket,
                path: &path,
                content_type: &cover.content_type,
                bytes: &cover.bytes,
                upsert: true,
            })
            .await?;

        // 4. Persist; drop the orphaned cover if that fails
        match self.comics.insert(&comic).await {
            Ok(stored) => {
                tracing::info!(comic_id = %stored.id, slug = %stored.slug, "Comic created");
                Ok(stored)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&self.settings.bucket, &[path]).await {
                    tracing::warn!(error = %cleanup, "Failed to remove orphaned cover");
                }
                Err(e)
            }
        }
    }

    /// `slug`, or `slug-2`, `slug-3`, ... whichever is free first.
    async fn unique_slug(&self, slug: &str) -> Result<String, DomainError> {
        if !self.comics.slug_exists(slug).await? {
            return Ok(slug.to_string());
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}-{}", slug, suffix);
            if !self.comics.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }
}
