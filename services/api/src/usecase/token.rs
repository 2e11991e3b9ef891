use jsonwebtoken::{DecodingKey, EncodingKey, Header, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims, hs256_validation};

use crate::domain::types::{GRANT_PURPOSE, PhoneGrant, User};
use crate::error::ApiError;

/// Claims of the short-lived token handed out after OTP verification.
///
/// `sub` is the phone grant id; the grant row, not the token, decides whether it is still usable.
#[derive(Debug, Serialize, Deserialize)]
pub struct GrantClaims {
    pub sub: String,
    pub phone: String,
    pub purpose: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

pub fn issue_access_token(user: &User, secret: &str) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        role: user.role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn issue_grant_token(grant: &PhoneGrant, secret: &str) -> Result<String, ApiError> {
    let claims = GrantClaims {
        sub: grant.id.to_string(),
        phone: grant.phone.clone(),
        purpose: GRANT_PURPOSE.to_owned(),
        exp: u64::try_from(grant.expires_at.timestamp()).unwrap_or(0),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

/// Check signature, expiry and purpose. Any failure means the caller has not verified a phone.
pub fn validate_grant_token(token: &str, secret: &str) -> Result<(Uuid, GrantClaims), ApiError> {
    let data = decode::<GrantClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &hs256_validation(),
    )
    .map_err(|_| ApiError::VerificationRequired)?;

    let claims = data.claims;
    if claims.purpose != GRANT_PURPOSE {
        return Err(ApiError::VerificationRequired);
    }
    let grant_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| ApiError::VerificationRequired)?;
    Ok((grant_id, claims))
}
