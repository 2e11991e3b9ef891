#![allow(async_fn_in_trait)]

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use hrdesk_domain::leave::{LeaveDecision, LeaveStatus};

use crate::domain::types::{Image, InfoItem, LeaveRequest, OtpRecord, PhoneGrant, User};
use crate::error::ApiError;

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError>;

    /// Insert a new account. Unique-key collisions surface as `EmailTaken` / `PhoneTaken`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;

    /// All accounts, oldest first.
    async fn list(&self) -> Result<Vec<User>, ApiError>;

    async fn set_profile_image(&self, id: Uuid, key: Option<&str>) -> Result<(), ApiError>;
}

pub trait OtpRepository: Send + Sync {
    async fn create(&self, record: &OtpRecord) -> Result<(), ApiError>;

    /// Newest record with this code that is unused and not expired at `now`.
    async fn find_latest_valid(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, ApiError>;

    /// Flip `is_used` from false to true. Returns `false` if another caller got there first.
    async fn mark_used(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait GrantRepository: Send + Sync {
    async fn create(&self, grant: &PhoneGrant) -> Result<(), ApiError>;

    async fn find_active(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<PhoneGrant>, ApiError>;

    /// Consume the grant and store the new password hash in one transaction.
    ///
    /// Returns `false` without touching the user when the grant was already consumed or expired.
    async fn redeem(
        &self,
        grant_id: Uuid,
        user_id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError>;
}

pub trait LeaveRepository: Send + Sync {
    async fn create(&self, request: &LeaveRequest) -> Result<(), ApiError>;

    /// Apply `decision` to a request that is still `Pending`.
    ///
    /// Returns the updated request, or `None` if it does not exist or was already decided.
    async fn decide(
        &self,
        id: Uuid,
        decision: LeaveDecision,
        at: DateTime<Utc>,
    ) -> Result<Option<LeaveRequest>, ApiError>;

    /// Requests by one employee, newest first.
    async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<LeaveRequest>, ApiError>;

    /// Requests in `status`, newest first.
    async fn list_by_status(&self, status: LeaveStatus) -> Result<Vec<LeaveRequest>, ApiError>;
}

pub trait ImageRepository: Send + Sync {
    async fn create(&self, image: &Image) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Image>, ApiError>;
    async fn list(&self) -> Result<Vec<Image>, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait InfoItemRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<InfoItem>, ApiError>;
    async fn create(&self, item: &InfoItem) -> Result<(), ApiError>;

    /// Overwrite name and detail. Returns `false` if no row has `item.id`.
    async fn update(&self, item: &InfoItem) -> Result<bool, ApiError>;

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Outbound SMS delivery.
pub trait SmsGateway: Send + Sync {
    /// Fails with `SmsDeliveryFailed` on transport errors and non-2xx replies.
    async fn send_otp(&self, phone: &str, code: &str) -> Result<(), ApiError>;
}

/// Flat key/value storage for uploaded files.
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), ApiError>;

    /// Returns `false` when the key did not exist.
    async fn delete(&self, key: &str) -> Result<bool, ApiError>;
}

pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String, ApiError>;
    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, ApiError>;
}
