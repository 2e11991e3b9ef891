//! Auth types shared across Hrdesk crates.
//!
//! Provides bearer-token claims, access-token validation and the `AuthUser` extractor.

pub mod bearer;
pub mod token;
