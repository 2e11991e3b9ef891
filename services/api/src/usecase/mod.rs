pub mod account;
pub mod image;
pub mod info_item;
pub mod leave;
pub mod otp;
pub mod profile;
pub mod token;

use crate::error::ApiError;

/// Rejects values that would not fit their column.
pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::InvalidField(field));
    }
    Ok(())
}
