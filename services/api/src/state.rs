use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use hrdesk_auth_types::bearer::JwtSecret;

use crate::infra::blob::FsBlobStore;
use crate::infra::db::{
    DbGrantRepository, DbImageRepository, DbInfoItemRepository, DbLeaveRepository,
    DbOtpRepository, DbUserRepository,
};
use crate::infra::password::BcryptHasher;
use crate::infra::sms::HttpSmsGateway;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub sms: HttpSmsGateway,
    pub blobs: FsBlobStore,
    pub hasher: BcryptHasher,
    pub public_base_url: Arc<str>,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn grant_repo(&self) -> DbGrantRepository {
        DbGrantRepository {
            db: self.db.clone(),
        }
    }

    pub fn leave_repo(&self) -> DbLeaveRepository {
        DbLeaveRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_repo(&self) -> DbImageRepository {
        DbImageRepository {
            db: self.db.clone(),
        }
    }

    pub fn info_item_repo(&self) -> DbInfoItemRepository {
        DbInfoItemRepository {
            db: self.db.clone(),
        }
    }

    pub fn secret(&self) -> String {
        self.jwt_secret.expose().to_owned()
    }
}
