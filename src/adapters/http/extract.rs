//! Request parsing helpers shared by the route modules.

use axum::extract::Multipart;
use serde::de::DeserializeOwned;

use crate::domain::account::UploadedFile;
use crate::domain::foundation::DomainError;

/// Parses a lowercase query value into an enum, falling back to its default
/// for absent or unknown values.
pub fn lenient_enum<T>(raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    raw.map(|v| v.trim().to_lowercase())
        .and_then(|v| serde_json::from_value(serde_json::Value::String(v)).ok())
        .unwrap_or_default()
}

/// Fields of a multipart form, read fully into memory.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: Vec<(String, String)>,
    files: Vec<(String, UploadedFile)>,
}

impl MultipartForm {
    /// Reads every field. Parts with a file name are files, the rest text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, DomainError> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(invalid_body)?;
                    // Browsers send an empty part when no file was chosen.
                    if !bytes.is_empty() {
                        let file = UploadedFile::new(file_name, content_type, bytes.to_vec());
                        form.files.push((name, file));
                    }
                }
                None => {
                    let value = field.text().await.map_err(invalid_body)?;
                    form.texts.push((name, value));
                }
            }
        }
        Ok(form)
    }

    /// First text value for `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every text value for `name`, in form order.
    pub fn texts<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.texts
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Removes and returns the first file sent as `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(n, _)| n == name)?;
        Some(self.files.remove(index).1)
    }
}

fn invalid_body(err: axum::extract::multipart::MultipartError) -> DomainError {
    DomainError::validation("body", format!("Invalid multipart body: {}", err.body_text()))
}
