use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_core::envelope::Success;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::extract::{Form, Json};
use crate::state::AppState;
use crate::usecase::account::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, ResetPasswordInput,
    ResetPasswordUseCase,
};

// ── POST /register ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub fullname: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub phone: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            fullname: user.fullname,
            phone: user.phone,
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Success<UserProfile>, ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        hasher: state.hasher,
    };
    let user = usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
            fullname: body.fullname,
            phone: body.phone,
        })
        .await?;
    Ok(Success::ok("user registered successfully", user.into()))
}

// ── POST /login ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
    pub user: LoginUser,
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Success<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher,
        jwt_secret: state.secret(),
    };
    let output = usecase
        .execute(LoginInput {
            email: form.email,
            password: form.password,
        })
        .await?;
    Ok(Success::ok(
        "login successful",
        LoginResponse {
            token: output.access_token,
            expires_at: output.access_token_exp,
            user: LoginUser {
                id: output.user.id,
                email: output.user.email,
                fullname: output.user.fullname,
            },
        },
    ))
}

// ── POST /reset-password ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub new_password: String,
    pub reset_token: Option<String>,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Success<()>, ApiError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        grants: state.grant_repo(),
        hasher: state.hasher,
        jwt_secret: state.secret(),
    };
    usecase
        .execute(ResetPasswordInput {
            new_password: body.new_password,
            reset_token: body.reset_token,
        })
        .await?;
    Ok(Success::message("password has been reset successfully"))
}
