use std::path::Path;

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{BlobStore, ImageRepository};
use crate::domain::types::Image;
use crate::error::ApiError;

/// Public URL of a stored blob: `{base}/Images/{key}`.
pub fn image_url(public_base_url: &str, key: &str) -> String {
    format!("{}/Images/{key}", public_base_url.trim_end_matches('/'))
}

/// Fresh blob key `<uuid><ext>`, keeping the upload's extension when it is plain alphanumerics.
pub fn blob_key(file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{}{ext}", Uuid::new_v4())
}

/// A file pulled out of a multipart body.
pub struct Upload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

// ── Upload ────────────────────────────────────────────────────────────────────

pub struct UploadImageUseCase<I: ImageRepository, B: BlobStore> {
    pub images: I,
    pub blobs: B,
}

impl<I: ImageRepository, B: BlobStore> UploadImageUseCase<I, B> {
    pub async fn execute(&self, upload: Option<Upload>) -> Result<Image, ApiError> {
        let upload = upload
            .filter(|u| !u.bytes.is_empty())
            .ok_or(ApiError::EmptyFile)?;

        let key = blob_key(upload.file_name.as_deref());
        self.blobs.put(&key, upload.bytes).await?;

        let image = Image {
            id: Uuid::now_v7(),
            path: key,
            created_at: Utc::now(),
        };
        if let Err(e) = self.images.create(&image).await {
            // Do not leave an orphaned file behind a failed insert.
            if let Err(cleanup) = self.blobs.delete(&image.path).await {
                tracing::warn!(error = ?cleanup, key = %image.path, "orphaned image blob");
            }
            return Err(e);
        }

        tracing::info!(image_id = %image.id, key = %image.path, "image uploaded");
        Ok(image)
    }
}

// ── List ──────────────────────────────────────────────────────────────────────

pub struct ListImagesUseCase<I: ImageRepository> {
    pub images: I,
}

impl<I: ImageRepository> ListImagesUseCase<I> {
    pub async fn execute(&self) -> Result<Vec<Image>, ApiError> {
        self.images.list().await
    }
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub struct DeleteImageUseCase<I: ImageRepository, B: BlobStore> {
    pub images: I,
    pub blobs: B,
}

impl<I: ImageRepository, B: BlobStore> DeleteImageUseCase<I, B> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        let image = self
            .images
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ImageNotFound)?;

        if !self.blobs.delete(&image.path).await? {
            tracing::warn!(image_id = %id, key = %image.path, "image blob already missing");
        }
        self.images.delete(id).await?;
        Ok(())
    }
}
