pub mod images;
pub mod info_items;
pub mod leave_requests;
pub mod otp_verifications;
pub mod phone_grants;
pub mod users;
