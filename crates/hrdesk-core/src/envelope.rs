//! Uniform JSON response envelope.
//!
//! Success: `{"status":"success","message":"..","data":..}` (`data` omitted when absent).
//! Error:   `{"status":"error","kind":"..","message":".."}`.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success {
        message: Cow<'static, str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<T>,
    },
    Error {
        kind: &'static str,
        message: String,
    },
}

/// Successful handler outcome, rendered as a `success` envelope.
#[derive(Debug)]
pub struct Success<T> {
    status: StatusCode,
    message: Cow<'static, str>,
    data: Option<T>,
}

impl<T: Serialize> Success<T> {
    /// `200 OK` with a payload.
    pub fn ok(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Success<()> {
    /// `200 OK` with only a message.
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        let body = Envelope::Success {
            message: self.message,
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Render an `error` envelope. Service error types call this from their `IntoResponse`.
pub fn error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    let body: Envelope<()> = Envelope::Error { kind, message };
    (status, Json(body)).into_response()
}
