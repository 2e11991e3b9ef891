//! `Authorization: Bearer` extractor.

use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use hrdesk_core::envelope::error_response;
use hrdesk_domain::user::UserRole;

use crate::token::{AuthError, validate_access_token};

/// HMAC key used to sign and verify bearer tokens.
///
/// Services expose it to the extractor through `FromRef<AppState>`.
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

/// Caller identity proven by a valid bearer access token.
///
/// Returns 401 if the header is absent, the signature does not verify, or the token expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub access_token_exp: u64,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AuthError;

    // Header and key are read synchronously so the returned future borrows nothing.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let bearer = parts.headers.typed_get::<Authorization<Bearer>>();

        async move {
            let bearer = bearer.ok_or(AuthError::Missing)?;
            let info = validate_access_token(bearer.token(), secret.expose()).inspect_err(|e| {
                tracing::debug!(reason = %e, "bearer token rejected");
            })?;
            Ok(Self {
                user_id: info.user_id,
                role: info.role,
                access_token_exp: info.access_token_exp,
            })
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", self.to_string())
    }
}
