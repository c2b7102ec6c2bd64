//! `AppError` and the `ApiResponse` envelope

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::codes::{ErrorCategory, ErrorCode};

/// Error returned by a handler
///
/// `details` carries structured context such as the offending form `field`
/// or the `title` the front end shows above the message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Map<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// `"{resource} not found"`, with `resource` in the details
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{resource} not found"))
            .with_detail("resource", resource)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Backend refused the request or sent something unreadable
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BackendError, msg)
    }

    /// Backend outage; the client may retry
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BackendUnavailable, msg)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Response envelope shared by every endpoint
///
/// ```json
/// { "code": 0, "message": "OK", "data": { ... } }
/// { "code": 2, "message": "Invalid phone number", "details": { "field": "phone" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self::outcome(ErrorCode::Success, message, data)
    }

    /// A completed request whose result is described by a non-zero code,
    /// e.g. a subscriber that was already on the list. Sent with HTTP 200.
    pub fn outcome(code: ErrorCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let category = self.code.category();
        if self.code.is_retryable() {
            tracing::warn!(code = %self.code, ?category, message = %self.message, "Backend unavailable");
        } else if category == ErrorCategory::System || status.is_server_error() {
            tracing::error!(code = %self.code, ?category, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = %self.code, ?category, message = %self.message, "Request rejected");
        }
        (status, Json(ApiResponse::<()>::from(self))).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        // A body with data is a completed request whatever its code
        let status = match (&self.data, ErrorCode::try_from(self.code)) {
            (Some(_), _) => StatusCode::OK,
            (None, Ok(code)) => code.http_status(),
            (None, Err(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}
