//! Attachment storage on the local filesystem
//!
//! Uploaded images land in one flat directory under generated names; the
//! stored filename is what selection records carry and what the serve route
//! takes back in.

use std::path::{Path, PathBuf};

use tracing::{error, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Image types the draft upload accepts
const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Attachment store rooted at one uploads directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the uploads directory if it is missing
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Store an uploaded image, returning the generated filename
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> ApiResult<String> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| {
                ApiError::BadRequest("Attachment must be a PNG, JPG, or JPEG image".to_string())
            })?;

        let filename = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::write(self.dir.join(&filename), bytes)
            .await
            .map_err(|e| {
                error!("Failed to store attachment: {}", e);
                ApiError::Internal
            })?;

        info!("Stored attachment {}", filename);
        Ok(filename)
    }

    /// Read a stored attachment back, along with its content type
    pub async fn open(&self, filename: &str) -> ApiResult<(Vec<u8>, &'static str)> {
        // only bare generated filenames are servable
        if filename.contains(['/', '\\']) || filename.contains("..") {
            return Err(ApiError::NotFound("Attachment not found".to_string()));
        }

        let content_type = content_type_for(filename)
            .ok_or_else(|| ApiError::NotFound("Attachment not found".to_string()))?;

        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(bytes) => Ok((bytes, content_type)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ApiError::NotFound("Attachment not found".to_string()))
            }
            Err(e) => {
                error!("Failed to read attachment: {}", e);
                Err(ApiError::Internal)
            }
        }
    }

    /// Directory the store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn content_type_for(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();

    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}
