//! Domain types shared across all Hrdesk crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod leave;
pub mod otp;
pub mod user;
