use uuid::Uuid;

use crate::domain::repository::InfoItemRepository;
use crate::domain::types::{ITEM_NAME_MAX_LEN, InfoItem};
use crate::error::ApiError;
use crate::usecase::check_len;

pub struct ListInfoItemsUseCase<R: InfoItemRepository> {
    pub items: R,
}

impl<R: InfoItemRepository> ListInfoItemsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<InfoItem>, ApiError> {
        let items = self.items.list().await?;
        if items.is_empty() {
            return Err(ApiError::NoData);
        }
        Ok(items)
    }
}

pub struct InfoItemInput {
    pub name: String,
    pub detail: String,
}

pub struct AddInfoItemUseCase<R: InfoItemRepository> {
    pub items: R,
}

impl<R: InfoItemRepository> AddInfoItemUseCase<R> {
    pub async fn execute(&self, input: InfoItemInput) -> Result<InfoItem, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::MissingField("name"));
        }
        if input.detail.trim().is_empty() {
            return Err(ApiError::MissingField("detail"));
        }
        check_len("name", &input.name, ITEM_NAME_MAX_LEN)?;

        let item = InfoItem {
            id: Uuid::now_v7(),
            name: input.name,
            detail: input.detail,
        };
        self.items.create(&item).await?;
        Ok(item)
    }
}

pub struct UpdateInfoItemUseCase<R: InfoItemRepository> {
    pub items: R,
}

impl<R: InfoItemRepository> UpdateInfoItemUseCase<R> {
    /// `path_id` comes from the URL and must equal `body_id`.
    pub async fn execute(
        &self,
        path_id: Uuid,
        body_id: Option<Uuid>,
        input: InfoItemInput,
    ) -> Result<InfoItem, ApiError> {
        if body_id != Some(path_id) {
            return Err(ApiError::IdMismatch);
        }
        check_len("name", &input.name, ITEM_NAME_MAX_LEN)?;

        let item = InfoItem {
            id: path_id,
            name: input.name,
            detail: input.detail,
        };
        if !self.items.update(&item).await? {
            return Err(ApiError::InfoItemNotFound);
        }
        Ok(item)
    }
}

pub struct DeleteInfoItemUseCase<R: InfoItemRepository> {
    pub items: R,
}

impl<R: InfoItemRepository> DeleteInfoItemUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.items.delete(id).await? {
            return Err(ApiError::InfoItemNotFound);
        }
        Ok(())
    }
}
