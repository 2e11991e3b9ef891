pub mod blob;
pub mod db;
pub mod password;
pub mod sms;
