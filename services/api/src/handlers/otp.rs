use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrdesk_core::envelope::Success;

use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use crate::usecase::otp::{SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};

// ── POST /send-otp ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone: String,
}

pub async fn send_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<Success<()>, ApiError> {
    let usecase = SendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        sms: state.sms.clone(),
    };
    usecase.execute(SendOtpInput { phone: body.phone }).await?;
    Ok(Success::message("otp sent successfully"))
}

// ── POST /verify-otp ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub otp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub reset_token: String,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Success<VerifyOtpResponse>, ApiError> {
    let usecase = VerifyOtpUseCase {
        otps: state.otp_repo(),
        grants: state.grant_repo(),
        jwt_secret: state.secret(),
    };
    let output = usecase.execute(VerifyOtpInput { otp: body.otp }).await?;
    Ok(Success::ok(
        "otp verified successfully",
        VerifyOtpResponse {
            reset_token: output.reset_token,
            expires_at: output.expires_at,
        },
    ))
}
