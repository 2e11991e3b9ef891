use chrono::Utc;
use uuid::Uuid;

use hrdesk_domain::user::UserRole;

use crate::domain::repository::{GrantRepository, PasswordHasher, UserRepository};
use crate::domain::types::{EMAIL_MAX_LEN, FULLNAME_MAX_LEN, PHONE_MAX_LEN, User};
use crate::error::ApiError;
use crate::usecase::check_len;
use crate::usecase::token::{issue_access_token, validate_grant_token};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── Register ──────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub fullname: Option<String>,
    pub phone: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: PasswordHasher> RegisterUseCase<U, H> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(ApiError::MissingField("email"));
        }
        if input.password.is_empty() {
            return Err(ApiError::MissingField("password"));
        }
        let fullname = non_blank(input.fullname).unwrap_or_default();
        let phone = non_blank(input.phone);
        check_len("email", email, EMAIL_MAX_LEN)?;
        check_len("fullname", &fullname, FULLNAME_MAX_LEN)?;
        if let Some(phone) = phone.as_deref() {
            check_len("phone", phone, PHONE_MAX_LEN)?;
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }
        if let Some(phone) = phone.as_deref() {
            if self.users.find_by_phone(phone).await?.is_some() {
                return Err(ApiError::PhoneTaken);
            }
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = User {
            id: Uuid::now_v7(),
            fullname,
            email: email.to_owned(),
            phone,
            password_hash: Some(password_hash),
            role: UserRole::default(),
            profile_image: None,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: String,
}

impl<U: UserRepository, H: PasswordHasher> LoginUseCase<U, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(ApiError::MissingField("email"));
        }
        if input.password.trim().is_empty() {
            return Err(ApiError::MissingField("password"));
        }

        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(ApiError::InvalidCredentials)?;
        if !self.hasher.verify(&input.password, hash).await? {
            return Err(ApiError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        Ok(LoginOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}

// ── Reset password ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub new_password: String,
    pub reset_token: Option<String>,
}

pub struct ResetPasswordUseCase<U, G, H>
where
    U: UserRepository,
    G: GrantRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub grants: G,
    pub hasher: H,
    pub jwt_secret: String,
}

impl<U, G, H> ResetPasswordUseCase<U, G, H>
where
    U: UserRepository,
    G: GrantRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ApiError> {
        if input.new_password.is_empty() {
            return Err(ApiError::MissingField("newPassword"));
        }

        let token = input
            .reset_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::VerificationRequired)?;
        let (grant_id, claims) = validate_grant_token(token, &self.jwt_secret)?;

        let now = Utc::now();
        let grant = self
            .grants
            .find_active(grant_id, now)
            .await?
            .ok_or(ApiError::VerificationRequired)?;
        if grant.phone != claims.phone {
            return Err(ApiError::VerificationRequired);
        }

        let user = self
            .users
            .find_by_phone(&grant.phone)
            .await?
            .ok_or(ApiError::PhoneNotRegistered)?;

        let password_hash = self.hasher.hash(&input.new_password).await?;
        if !self
            .grants
            .redeem(grant.id, user.id, &password_hash, now)
            .await?
        {
            return Err(ApiError::VerificationRequired);
        }

        tracing::info!(user_id = %user.id, grant_id = %grant.id, "password reset");
        Ok(())
    }
}
