use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use hrdesk_domain::otp::{OTP_SPACE, format_code, is_well_formed};

use crate::domain::repository::{GrantRepository, OtpRepository, SmsGateway, UserRepository};
use crate::domain::types::{GRANT_TTL_SECS, OTP_TTL_SECS, OtpRecord, PhoneGrant};
use crate::error::ApiError;
use crate::usecase::token::issue_grant_token;

fn generate_code() -> String {
    let mut rng = rand::rng();
    format_code(rng.random_range(0..OTP_SPACE))
}

// ── Send ──────────────────────────────────────────────────────────────────────

pub struct SendOtpInput {
    pub phone: String,
}

pub struct SendOtpUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SmsGateway,
{
    pub users: U,
    pub otps: O,
    pub sms: S,
}

impl<U, O, S> SendOtpUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SmsGateway,
{
    pub async fn execute(&self, input: SendOtpInput) -> Result<(), ApiError> {
        let phone = input.phone.trim();
        if phone.is_empty() {
            return Err(ApiError::MissingField("phone"));
        }

        self.users
            .find_by_phone(phone)
            .await?
            .ok_or(ApiError::PhoneNotRegistered)?;

        let code = generate_code();

        // Persist only after the gateway accepted the message.
        // A failed send leaves no usable code.
        self.sms.send_otp(phone, &code).await?;

        let now = Utc::now();
        let record = OtpRecord {
            id: Uuid::now_v7(),
            phone: phone.to_owned(),
            code,
            created_at: now,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            is_used: false,
        };
        self.otps.create(&record).await?;

        tracing::info!(otp_id = %record.id, "otp dispatched");
        Ok(())
    }
}

// ── Verify ────────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub otp: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub reset_token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct VerifyOtpUseCase<O: OtpRepository, G: GrantRepository> {
    pub otps: O,
    pub grants: G,
    pub jwt_secret: String,
}

impl<O: OtpRepository, G: GrantRepository> VerifyOtpUseCase<O, G> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, ApiError> {
        let code = input.otp.trim();
        if code.is_empty() {
            return Err(ApiError::MissingField("otp"));
        }
        if !is_well_formed(code) {
            return Err(ApiError::InvalidOrExpiredOtp);
        }

        let now = Utc::now();
        let record = self
            .otps
            .find_latest_valid(code, now)
            .await?
            .ok_or(ApiError::InvalidOrExpiredOtp)?;

        // Lost a race with another verification of the same code.
        if !self.otps.mark_used(record.id).await? {
            return Err(ApiError::InvalidOrExpiredOtp);
        }

        let grant = PhoneGrant {
            id: Uuid::now_v7(),
            phone: record.phone,
            created_at: now,
            expires_at: now + Duration::seconds(GRANT_TTL_SECS),
            consumed_at: None,
        };
        self.grants.create(&grant).await?;
        let reset_token = issue_grant_token(&grant, &self.jwt_secret)?;

        tracing::info!(otp_id = %record.id, grant_id = %grant.id, "otp verified");
        Ok(VerifyOtpOutput {
            reset_token,
            expires_at: grant.expires_at,
        })
    }
}
