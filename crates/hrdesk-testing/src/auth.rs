//! Mock identity helpers for integration tests.
//!
//! Protected routes require `Authorization: Bearer <jwt>`. `MockAuth` signs a real
//! access token with the test secret so requests pass the `AuthUser` extractor.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use hrdesk_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims};
use hrdesk_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A signed access token for this identity.
    pub fn token(&self, secret: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + ACCESS_TOKEN_EXP;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            role: self.role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self, secret: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap()
    }

    /// Return headers carrying the bearer token.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer(secret));
        map
    }
}
