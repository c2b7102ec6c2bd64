//! Form validation pipeline
//!
//! Raw form input arrives as a JSON object ([`RawForm`]). Each form type
//! declares a [`Schema`]: an ordered list of fields with one [`FieldKind`]
//! each. Fields are checked in declaration order and the first failure is
//! reported as a [`ValidationError`]; nothing partial is ever returned.
//!
//! ```
//! use chrono::NaiveDate;
//! use shared::models::ContactMessage;
//! use shared::validation::{RawForm, validate_form};
//!
//! let raw: RawForm = serde_json::from_str(
//!     r#"{"name":"Asha","email":"asha@example.com","message":"Do you cater weddings?"}"#,
//! ).unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let msg: ContactMessage = validate_form(&raw, today).unwrap();
//! assert_eq!(msg.name, "Asha");
//! ```

mod forms;
pub mod rules;
mod schema;

pub use forms::{BOOKING_SCHEMA, CONTACT_SCHEMA, Form, SUBSCRIBER_SCHEMA, validate_form};
pub use schema::{Field, FieldKind, FieldValue, RawForm, Schema, ValidatedFields};

use crate::error::AppError;
use thiserror::Error;

/// First failing field of a form, with the message shown to the visitor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.message).with_detail("field", err.field)
    }
}
