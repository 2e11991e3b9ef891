use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use hrdesk_domain::leave::LeaveStatus;
use hrdesk_domain::user::UserRole;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    /// bcrypt hash. `None` for accounts that never set a password.
    pub password_hash: Option<String>,
    pub role: UserRole,
    /// Blob key of the current profile picture.
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Passcode sent by SMS during password recovery.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: Uuid,
    pub phone: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
}

/// Server-side proof that a phone number passed OTP verification.
///
/// Redeemed exactly once by a password reset.
#[derive(Debug, Clone)]
pub struct PhoneGrant {
    pub id: Uuid,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub requested_at: DateTime<Utc>,
    pub approved_by_id: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Uploaded image. `path` is the blob key under the image directory.
#[derive(Debug, Clone)]
pub struct Image {
    pub id: Uuid,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub id: Uuid,
    pub name: String,
    pub detail: String,
}

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// Phone grant time-to-live in seconds.
pub const GRANT_TTL_SECS: i64 = 1200;

/// `purpose` claim carried by grant tokens.
pub const GRANT_PURPOSE: &str = "password_reset";

/// Column widths of the `users`, `leave_requests` and `info_items` tables, in characters.
pub const FULLNAME_MAX_LEN: usize = 40;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 20;
pub const REASON_MAX_LEN: usize = 500;
pub const ITEM_NAME_MAX_LEN: usize = 100;
