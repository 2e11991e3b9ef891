use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::bearer::AuthUser;
use hrdesk_core::envelope::Success;

use crate::domain::types::InfoItem;
use crate::error::ApiError;
use crate::extract::{Json, Path, resource_id};
use crate::state::AppState;
use crate::usecase::info_item::{
    AddInfoItemUseCase, DeleteInfoItemUseCase, InfoItemInput, ListInfoItemsUseCase,
    UpdateInfoItemUseCase,
};

#[derive(Serialize)]
pub struct InfoItemResponse {
    pub id: Uuid,
    pub name: String,
    pub detail: String,
}

impl From<InfoItem> for InfoItemResponse {
    fn from(item: InfoItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            detail: item.detail,
        }
    }
}

#[derive(Deserialize)]
pub struct InfoItemRequest {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail: String,
}

// ── GET /details ──────────────────────────────────────────────────────────────

pub async fn list_info_items(
    _caller: AuthUser,
    State(state): State<AppState>,
) -> Result<Success<Vec<InfoItemResponse>>, ApiError> {
    let usecase = ListInfoItemsUseCase {
        items: state.info_item_repo(),
    };
    let items = usecase.execute().await?;
    Ok(Success::ok(
        "items fetched",
        items.into_iter().map(Into::into).collect(),
    ))
}

// ── POST /additem ─────────────────────────────────────────────────────────────

pub async fn add_info_item(
    _caller: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<InfoItemRequest>,
) -> Result<Success<InfoItemResponse>, ApiError> {
    let usecase = AddInfoItemUseCase {
        items: state.info_item_repo(),
    };
    let item = usecase
        .execute(InfoItemInput {
            name: body.name,
            detail: body.detail,
        })
        .await?;
    Ok(Success::ok("item added successfully", item.into()))
}

// ── PUT /update/{id} ──────────────────────────────────────────────────────────

pub async fn update_info_item(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<InfoItemRequest>,
) -> Result<Success<InfoItemResponse>, ApiError> {
    let id = resource_id(&id, ApiError::InfoItemNotFound)?;
    let usecase = UpdateInfoItemUseCase {
        items: state.info_item_repo(),
    };
    let item = usecase
        .execute(
            id,
            body.id,
            InfoItemInput {
                name: body.name,
                detail: body.detail,
            },
        )
        .await?;
    Ok(Success::ok("item updated successfully", item.into()))
}

// ── DELETE /delete/{id} ───────────────────────────────────────────────────────

pub async fn delete_info_item(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<()>, ApiError> {
    let id = resource_id(&id, ApiError::InfoItemNotFound)?;
    let usecase = DeleteInfoItemUseCase {
        items: state.info_item_repo(),
    };
    usecase.execute(id).await?;
    Ok(Success::message("item deleted successfully"))
}
