//! Error vocabulary shared by the server and the web front end
//!
//! - [`ErrorCode`]: numeric codes, grouped by range into an [`ErrorCategory`]
//! - [`AppError`]: code + message + structured details, returned by handlers
//! - [`ApiResponse`]: the `{ code, message, data, details }` envelope
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::validation("Invalid email address").with_detail("field", "email");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let body = ApiResponse::<()>::from(err);
//! assert_eq!(body.code, 2);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCategory, ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
