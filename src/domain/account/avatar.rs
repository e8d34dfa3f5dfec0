//! Uploaded profile pictures.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// An image file received from a form upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.trim().to_ascii_lowercase().starts_with("image/")
    }

    /// Lowercased extension from the file name, `png` when there is none.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "png".to_string())
    }

    /// File name reduced to characters safe inside an object key.
    pub fn safe_file_name(&self) -> String {
        let cleaned: String = self
            .file_name
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if cleaned.trim_matches('.').is_empty() {
            format!("upload.{}", self.extension())
        } else {
            cleaned
        }
    }
}

/// Avatars must be images no larger than `max_bytes`.
pub fn validate_avatar(file: &UploadedFile, max_bytes: usize) -> Result<(), ValidationError> {
    if !file.is_image() {
        return Err(ValidationError::invalid_format(
            "avatar",
            "File must be an image (jpg/png/webp).",
        ));
    }
    if file.bytes.len() > max_bytes {
        return Err(ValidationError::invalid_format(
            "avatar",
            format!("Image size is limited to {}MB.", max_bytes / (1024 * 1024)),
        ));
    }
    Ok(())
}

/// `{user_id}/{unix_millis}.{ext}` inside the avatars bucket.
pub fn avatar_object_path(user: &UserId, at: Timestamp, file: &UploadedFile) -> String {
    format!("{}/{}.{}", user, at.unix_millis(), file.extension())
}

/// `cover-{unix_millis}-{file_name}` inside the covers bucket.
pub fn cover_object_path(at: Timestamp, file: &UploadedFile) -> String {
    format!("cover-{}-{}", at.unix_millis(), file.safe_file_name())
}
