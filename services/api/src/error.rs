use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hrdesk_core::envelope::error_response;
use hrdesk_domain::leave::InvalidDateRange;

/// API error variants. Each maps to one `kind` code and one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} is invalid")]
    InvalidField(&'static str),
    #[error("end date cannot be earlier than start date")]
    InvalidDateRange,
    #[error("id in path does not match id in body")]
    IdMismatch,
    #[error("employee does not exist")]
    UnknownEmployee,
    #[error("no file was uploaded")]
    EmptyFile,
    #[error("malformed multipart body")]
    MalformedUpload,
    #[error("user already exists with this email")]
    EmailTaken,
    #[error("phone number is already registered")]
    PhoneTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user not registered")]
    PhoneNotRegistered,
    #[error("invalid or expired otp")]
    InvalidOrExpiredOtp,
    #[error("otp verification required")]
    VerificationRequired,
    #[error("user not found")]
    UserNotFound,
    #[error("pending leave request not found")]
    PendingLeaveNotFound,
    #[error("image not found")]
    ImageNotFound,
    #[error("info item not found")]
    InfoItemNotFound,
    #[error("user has no profile image")]
    NoProfileImage,
    #[error("no image to delete")]
    NoImageToDelete,
    #[error("no data found")]
    NoData,
    #[error("otp sending failed")]
    SmsDeliveryFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidField(_) => "INVALID_FIELD",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::IdMismatch => "ID_MISMATCH",
            Self::UnknownEmployee => "UNKNOWN_EMPLOYEE",
            Self::EmptyFile => "EMPTY_FILE",
            Self::MalformedUpload => "MALFORMED_UPLOAD",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::PhoneTaken => "PHONE_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::PhoneNotRegistered => "PHONE_NOT_REGISTERED",
            Self::InvalidOrExpiredOtp => "INVALID_OR_EXPIRED_OTP",
            Self::VerificationRequired => "VERIFICATION_REQUIRED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PendingLeaveNotFound => "PENDING_LEAVE_NOT_FOUND",
            Self::ImageNotFound => "IMAGE_NOT_FOUND",
            Self::InfoItemNotFound => "INFO_ITEM_NOT_FOUND",
            Self::NoProfileImage => "NO_PROFILE_IMAGE",
            Self::NoImageToDelete => "NO_IMAGE_TO_DELETE",
            Self::NoData => "NO_DATA",
            Self::SmsDeliveryFailed => "SMS_DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::InvalidField(_)
            | Self::InvalidDateRange
            | Self::IdMismatch
            | Self::UnknownEmployee
            | Self::EmptyFile
            | Self::MalformedUpload
            | Self::EmailTaken
            | Self::PhoneTaken
            | Self::PhoneNotRegistered
            | Self::InvalidOrExpiredOtp
            | Self::VerificationRequired
            | Self::NoImageToDelete => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserNotFound
            | Self::PendingLeaveNotFound
            | Self::ImageNotFound
            | Self::InfoItemNotFound
            | Self::NoProfileImage
            | Self::NoData => StatusCode::NOT_FOUND,
            Self::SmsDeliveryFailed | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidDateRange> for ApiError {
    fn from(_: InvalidDateRange) -> Self {
        Self::InvalidDateRange
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected json body");
        Self::InvalidField("request body")
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected form body");
        Self::InvalidField("form body")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected query string");
        Self::InvalidField("query string")
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected path parameters");
        Self::InvalidField("path")
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected multipart body");
        Self::MalformedUpload
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // TraceLayer already records every response status; only the anyhow chain is extra.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
