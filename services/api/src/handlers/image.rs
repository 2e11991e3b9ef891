use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;
use uuid::Uuid;

use hrdesk_auth_types::bearer::AuthUser;
use hrdesk_core::envelope::Success;

use crate::error::ApiError;
use crate::extract::{Path, resource_id};
use crate::state::AppState;
use crate::usecase::image::{
    DeleteImageUseCase, ListImagesUseCase, Upload, UploadImageUseCase, image_url,
};

/// Fields of an upload form. Unknown parts are skipped.
#[derive(Default)]
pub(crate) struct UploadForm {
    pub file: Option<Upload>,
    pub user_id: Option<String>,
}

pub(crate) async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::MalformedUpload)?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.map_err(|_| ApiError::MalformedUpload)?;
                form.file = Some(Upload { file_name, bytes });
            }
            Some("userId") => {
                let text = field.text().await.map_err(|_| ApiError::MalformedUpload)?;
                form.user_id = Some(text);
            }
            _ => {}
        }
    }
    Ok(form)
}

// ── POST /upload-image ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub id: Uuid,
    pub image_url: String,
}

pub async fn upload_image(
    _caller: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Success<UploadImageResponse>, ApiError> {
    let form = read_upload_form(multipart?).await?;
    let usecase = UploadImageUseCase {
        images: state.image_repo(),
        blobs: state.blobs.clone(),
    };
    let image = usecase.execute(form.file).await?;
    Ok(Success::ok(
        "image uploaded successfully",
        UploadImageResponse {
            id: image.id,
            image_url: image_url(&state.public_base_url, &image.path),
        },
    ))
}

// ── GET /all-images ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ImageEntry {
    pub id: Uuid,
    pub url: String,
}

#[derive(Serialize)]
pub struct ImageList {
    pub count: usize,
    pub images: Vec<ImageEntry>,
}

pub async fn list_images(
    _caller: AuthUser,
    State(state): State<AppState>,
) -> Result<Success<ImageList>, ApiError> {
    let usecase = ListImagesUseCase {
        images: state.image_repo(),
    };
    let images: Vec<ImageEntry> = usecase
        .execute()
        .await?
        .into_iter()
        .map(|image| ImageEntry {
            id: image.id,
            url: image_url(&state.public_base_url, &image.path),
        })
        .collect();
    Ok(Success::ok(
        "images fetched",
        ImageList {
            count: images.len(),
            images,
        },
    ))
}

// ── DELETE /delete-image/{id} ─────────────────────────────────────────────────

pub async fn delete_image(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<()>, ApiError> {
    let id = resource_id(&id, ApiError::ImageNotFound)?;
    let usecase = DeleteImageUseCase {
        images: state.image_repo(),
        blobs: state.blobs.clone(),
    };
    usecase.execute(id).await?;
    Ok(Success::message("image deleted successfully"))
}
