//! JSON response envelopes and the HTTP error type.
//!
//! Every JSON response carries a `success` flag. Successful responses put
//! their payload under `data`; failures carry a human-readable `message`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Successful response body: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    /// Always `true`.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

/// Render `data` in a success envelope with the given status.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(Success {
            success: true,
            data,
        }),
    )
        .into_response()
}

/// `200 { "success": true }` with no payload.
pub fn acknowledged() -> Response {
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

/// Errors returned by request handlers.
///
/// Rendered as `{ "success": false, "message": ... }` with the matching status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    /// Missing or malformed input (400).
    #[error("{0}")]
    BadRequest(String),

    /// Caller has no valid access rule (403).
    #[error("{0}")]
    Forbidden(String),

    /// Resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The document API failed (500). `status` is echoed when it answered.
    #[error("{message}")]
    Upstream {
        /// Human-readable message
        message: String,
        /// Upstream HTTP status, if any
        status: Option<u16>,
    },

    /// The document API URL or token is not configured (500).
    #[error("Mayan API config missing.")]
    NotConfigured,
}

impl ApiError {
    /// Creates a bad request error.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Creates an upstream error without a status.
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        ApiError::Upstream {
            message: message.into(),
            status: None,
        }
    }

    /// Creates an upstream error echoing the upstream status.
    pub fn upstream_status<S: Into<String>>(message: S, status: u16) -> Self {
        ApiError::Upstream {
            message: message.into(),
            status: Some(status),
        }
    }

    /// HTTP status this error renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } | ApiError::NotConfigured => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Upstream {
                message,
                status: Some(upstream),
            } => json!({ "success": false, "message": message, "status": upstream }),
            other => json!({ "success": false, "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
