//! Error codes and their categories
//!
//! Codes are grouped by range:
//! - 0xxx: General
//! - 1xxx: Authentication
//! - 2xxx: Permission
//! - 3xxx: Menu, gallery and testimonials
//! - 4xxx: Submissions (bookings, contact messages, subscribers)
//! - 9xxx: System

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every [`ApiResponse`](super::ApiResponse)
///
/// Serialized as its numeric value so the web front end can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// No bearer token on an admin request
    NotAuthenticated = 1001,
    /// Token refused by the backend
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,
    /// Visitors cannot write to `menu` / `gallery`
    TableReadOnly = 2002,

    // ==================== 3xxx: Menu ====================
    MenuItemNotFound = 3001,
    /// `page` query parameter is not a number
    MenuPageInvalid = 3002,
    /// Carousel index out of range
    TestimonialNotFound = 3201,

    // ==================== 4xxx: Submissions ====================
    /// Email already on the newsletter list (not a failure)
    SubscriberExists = 4202,
    SubmissionFailed = 4301,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    /// Backend refused the request or returned rows we cannot read
    BackendError = 9002,
    /// Backend unreachable, timed out or overloaded; resubmitting may work
    BackendUnavailable = 9006,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 17] = [
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::NotAuthenticated,
        ErrorCode::TokenInvalid,
        ErrorCode::PermissionDenied,
        ErrorCode::TableReadOnly,
        ErrorCode::MenuItemNotFound,
        ErrorCode::MenuPageInvalid,
        ErrorCode::TestimonialNotFound,
        ErrorCode::SubscriberExists,
        ErrorCode::SubmissionFailed,
        ErrorCode::InternalError,
        ErrorCode::BackendError,
        ErrorCode::BackendUnavailable,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// HTTP status and default message
    const fn info(&self) -> (StatusCode, &'static str) {
        match self {
            ErrorCode::Success => (StatusCode::OK, "OK"),
            ErrorCode::Unknown => (StatusCode::INTERNAL_SERVER_ERROR, "An unknown error occurred"),
            ErrorCode::ValidationFailed => (StatusCode::BAD_REQUEST, "Validation failed"),
            ErrorCode::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
            ErrorCode::AlreadyExists => (StatusCode::CONFLICT, "We already have this request on file"),

            ErrorCode::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Sign in required"),
            ErrorCode::TokenInvalid => (StatusCode::UNAUTHORIZED, "Session expired, please sign in again"),

            ErrorCode::PermissionDenied => (StatusCode::FORBIDDEN, "Permission denied"),
            ErrorCode::TableReadOnly => (StatusCode::FORBIDDEN, "Table is read-only"),

            ErrorCode::MenuItemNotFound => (StatusCode::NOT_FOUND, "Menu item not found"),
            ErrorCode::MenuPageInvalid => (StatusCode::BAD_REQUEST, "Invalid menu page"),
            ErrorCode::TestimonialNotFound => (StatusCode::NOT_FOUND, "Testimonial not found"),

            ErrorCode::SubscriberExists => (StatusCode::CONFLICT, "This email is already on our list!"),
            ErrorCode::SubmissionFailed => (StatusCode::INTERNAL_SERVER_ERROR, "Submission failed"),

            ErrorCode::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            ErrorCode::BackendError => (StatusCode::BAD_GATEWAY, "Backend error"),
            ErrorCode::BackendUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Backend is unavailable, please try again")
            }
        }
    }

    /// HTTP status used when this code is returned without data
    pub const fn http_status(&self) -> StatusCode {
        self.info().0
    }

    pub const fn message(&self) -> &'static str {
        self.info().1
    }

    /// Whether the same request may succeed if retried later
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::BackendUnavailable)
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A numeric code no [`ErrorCode`] maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ErrorCode::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Code range an [`ErrorCode`] falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Menu,
    Submission,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Menu,
            4 => Self::Submission,
            _ => Self::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_round_trips() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(6001), Err(InvalidErrorCode(6001)));
    }

    #[test]
    fn test_statuses() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MenuPageInvalid.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotAuthenticated.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::TableReadOnly.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::TestimonialNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::SubmissionFailed.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ErrorCode::BackendUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_only_backend_outage_is_retryable() {
        let retryable: Vec<_> = ErrorCode::ALL.into_iter().filter(ErrorCode::is_retryable).collect();
        assert_eq!(retryable, vec![ErrorCode::BackendUnavailable]);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenInvalid.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::TableReadOnly.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::MenuItemNotFound.category(), ErrorCategory::Menu);
        assert_eq!(ErrorCode::SubscriberExists.category(), ErrorCategory::Submission);
        assert_eq!(ErrorCode::BackendError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_serialized_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::SubscriberExists).unwrap(), "4202");
        let code: ErrorCode = serde_json::from_str("9006").unwrap();
        assert_eq!(code, ErrorCode::BackendUnavailable);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }
}
