//! Test utilities for Hrdesk services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
