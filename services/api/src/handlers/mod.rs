pub mod account;
pub mod health;
pub mod image;
pub mod info_item;
pub mod leave;
pub mod otp;
pub mod profile;
