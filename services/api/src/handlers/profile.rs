use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;
use uuid::Uuid;

use hrdesk_auth_types::bearer::AuthUser;
use hrdesk_core::envelope::Success;
use hrdesk_domain::user::UserRole;

use crate::error::ApiError;
use crate::extract::{Path, resource_id};
use crate::handlers::image::read_upload_form;
use crate::state::AppState;
use crate::usecase::image::image_url;
use crate::usecase::profile::{
    DeleteProfileImageUseCase, GetProfileImageUseCase, ListUserCardsUseCase,
    UploadProfileImageUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageResponse {
    pub image_url: String,
}

// ── POST /upload-profile-image ────────────────────────────────────────────────

pub async fn upload_profile_image(
    _caller: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Success<ProfileImageResponse>, ApiError> {
    let form = read_upload_form(multipart?).await?;
    let user_id = form
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField("userId"))?
        .parse::<Uuid>()
        .map_err(|_| ApiError::InvalidField("userId"))?;

    let usecase = UploadProfileImageUseCase {
        users: state.user_repo(),
        blobs: state.blobs.clone(),
    };
    let key = usecase.execute(user_id, form.file).await?;
    Ok(Success::ok(
        "profile image uploaded successfully",
        ProfileImageResponse {
            image_url: image_url(&state.public_base_url, &key),
        },
    ))
}

// ── GET /get-profile-image/{id} ───────────────────────────────────────────────

pub async fn get_profile_image(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Success<ProfileImageResponse>, ApiError> {
    let user_id = resource_id(&user_id, ApiError::UserNotFound)?;
    let usecase = GetProfileImageUseCase {
        users: state.user_repo(),
    };
    let key = usecase.execute(user_id).await?;
    Ok(Success::ok(
        "profile image fetched",
        ProfileImageResponse {
            image_url: image_url(&state.public_base_url, &key),
        },
    ))
}

// ── DELETE /delete-profile-image/{id} ─────────────────────────────────────────

pub async fn delete_profile_image(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Success<()>, ApiError> {
    let user_id = resource_id(&user_id, ApiError::UserNotFound)?;
    let usecase = DeleteProfileImageUseCase {
        users: state.user_repo(),
        blobs: state.blobs.clone(),
    };
    usecase.execute(user_id).await?;
    Ok(Success::message("profile image deleted successfully"))
}

// ── GET /user-infowithprofileimagenameandrole ─────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    pub name: String,
    pub role: UserRole,
    pub image_url: Option<String>,
}

pub async fn list_user_cards(
    _caller: AuthUser,
    State(state): State<AppState>,
) -> Result<Success<Vec<UserCard>>, ApiError> {
    let usecase = ListUserCardsUseCase {
        users: state.user_repo(),
    };
    let cards = usecase
        .execute()
        .await?
        .into_iter()
        .map(|user| UserCard {
            name: user.fullname,
            role: user.role,
            image_url: user
                .profile_image
                .map(|key| image_url(&state.public_base_url, &key)),
        })
        .collect();
    Ok(Success::ok("users fetched", cards))
}
