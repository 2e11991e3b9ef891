use uuid::Uuid;

use crate::domain::repository::{BlobStore, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::usecase::image::{Upload, blob_key};

// ── Upload ────────────────────────────────────────────────────────────────────

pub struct UploadProfileImageUseCase<U: UserRepository, B: BlobStore> {
    pub users: U,
    pub blobs: B,
}

impl<U: UserRepository, B: BlobStore> UploadProfileImageUseCase<U, B> {
    /// Store a new picture and drop the previous one. Returns the new blob key.
    pub async fn execute(
        &self,
        user_id: Uuid,
        upload: Option<Upload>,
    ) -> Result<String, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let upload = upload
            .filter(|u| !u.bytes.is_empty())
            .ok_or(ApiError::EmptyFile)?;

        let key = blob_key(upload.file_name.as_deref());
        self.blobs.put(&key, upload.bytes).await?;
        if let Err(e) = self.users.set_profile_image(user.id, Some(&key)).await {
            if let Err(cleanup) = self.blobs.delete(&key).await {
                tracing::warn!(error = ?cleanup, %key, "orphaned profile image blob");
            }
            return Err(e);
        }

        if let Some(old) = user.profile_image {
            if !self.blobs.delete(&old).await? {
                tracing::warn!(
                    user_id = %user.id,
                    key = %old,
                    "previous profile image already missing"
                );
            }
        }
        Ok(key)
    }
}

// ── Get ───────────────────────────────────────────────────────────────────────

pub struct GetProfileImageUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileImageUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<String, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        user.profile_image.ok_or(ApiError::NoProfileImage)
    }
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub struct DeleteProfileImageUseCase<U: UserRepository, B: BlobStore> {
    pub users: U,
    pub blobs: B,
}

impl<U: UserRepository, B: BlobStore> DeleteProfileImageUseCase<U, B> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let key = user.profile_image.ok_or(ApiError::NoImageToDelete)?;

        self.blobs.delete(&key).await?;
        self.users.set_profile_image(user.id, None).await?;
        Ok(())
    }
}

// ── Directory ─────────────────────────────────────────────────────────────────

pub struct ListUserCardsUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUserCardsUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<User>, ApiError> {
        let users = self.users.list().await?;
        if users.is_empty() {
            return Err(ApiError::NoData);
        }
        Ok(users)
    }
}
