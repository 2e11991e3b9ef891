//! Request extractors whose rejections render as `ApiError` envelopes.
//!
//! axum's own `Json`, `Form`, `Query` and `Path` answer with plain-text bodies and
//! 415/422 statuses. These wrappers keep the same extraction and route every failure
//! through `ApiError` instead.

use axum::extract::{FromRequest, FromRequestParts};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct Form<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Parses a resource id taken from the path. An id that is not a UUID names no
/// stored row, so it fails with the resource's not-found error.
pub fn resource_id(raw: &str, not_found: ApiError) -> Result<Uuid, ApiError> {
    raw.trim().parse().map_err(|_| not_found)
}
