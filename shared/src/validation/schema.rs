//! Declarative form schemas

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};

use super::ValidationError;
use super::rules;

/// Raw field-value mapping as posted by the front end
pub type RawForm = Map<String, Value>;

/// What a field must look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text with character bounds
    Text {
        min: usize,
        max: usize,
        min_message: &'static str,
        max_message: &'static str,
    },
    /// Email address, format checked before length
    Email { max: usize, max_message: &'static str },
    /// 10-15 digits, optional leading `+`
    Phone,
    /// Whole number within bounds
    Integer {
        min: i64,
        max: i64,
        min_message: &'static str,
        max_message: &'static str,
    },
    /// ISO date; `not_in_past` compares against the caller's "today"
    Date { not_in_past: bool },
    /// Local time of day
    Time,
}

/// One declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// Used in type-mismatch messages ("Guests must be a whole number")
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Reported when a required field is missing, null, or (for dates and
    /// times) empty
    pub required_message: &'static str,
}

impl Field {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            required_message: "This field is required",
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            required_message: "This field is required",
        }
    }

    pub const fn with_required_message(mut self, message: &'static str) -> Self {
        self.required_message = message;
        self
    }

    fn err(&self, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.name, message)
    }

    /// Check one raw value. `Ok(None)` means an absent optional field.
    fn check(
        &self,
        raw: Option<&Value>,
        today: NaiveDate,
    ) -> Result<Option<FieldValue>, ValidationError> {
        let value = match raw {
            None | Some(Value::Null) if self.required => {
                return Err(self.err(self.required_message));
            }
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) if s.is_empty() && !self.required => return Ok(None),
            Some(v) => v,
        };

        match self.kind {
            FieldKind::Text {
                min,
                max,
                min_message,
                max_message,
            } => {
                let text = self.expect_str(value)?;
                let len = rules::char_len(text);
                if len < min {
                    return Err(self.err(min_message));
                }
                if len > max {
                    return Err(self.err(max_message));
                }
                Ok(Some(FieldValue::Text(text.to_string())))
            }
            FieldKind::Email { max, max_message } => {
                let text = self.expect_str(value)?;
                if !rules::is_email(text) {
                    return Err(self.err("Invalid email address"));
                }
                if rules::char_len(text) > max {
                    return Err(self.err(max_message));
                }
                Ok(Some(FieldValue::Text(text.to_string())))
            }
            FieldKind::Phone => {
                let text = self.expect_str(value)?;
                if !rules::is_phone(text) {
                    return Err(self.err("Invalid phone number"));
                }
                Ok(Some(FieldValue::Text(text.to_string())))
            }
            FieldKind::Integer {
                min,
                max,
                min_message,
                max_message,
            } => {
                let n = rules::as_integer(value)
                    .ok_or_else(|| self.err(format!("{} must be a whole number", self.label)))?;
                if n < min {
                    return Err(self.err(min_message));
                }
                if n > max {
                    return Err(self.err(max_message));
                }
                Ok(Some(FieldValue::Integer(n)))
            }
            FieldKind::Date { not_in_past } => {
                let text = self.expect_str(value)?;
                if text.is_empty() {
                    return Err(self.err(self.required_message));
                }
                let date = rules::parse_date(text).ok_or_else(|| self.err("Invalid date"))?;
                if not_in_past && date < today {
                    return Err(self.err("Date cannot be in the past"));
                }
                Ok(Some(FieldValue::Date(date)))
            }
            FieldKind::Time => {
                let text = self.expect_str(value)?;
                if text.is_empty() {
                    return Err(self.err(self.required_message));
                }
                let time = rules::parse_time(text).ok_or_else(|| self.err("Invalid time"))?;
                Ok(Some(FieldValue::Time(time)))
            }
        }
    }

    fn expect_str<'v>(&self, value: &'v Value) -> Result<&'v str, ValidationError> {
        value
            .as_str()
            .ok_or_else(|| self.err(format!("{} must be text", self.label)))
    }
}

/// Normalized value of a field that passed its check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// Ordered field declarations for one form type
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    /// Check every declared field in order, stopping at the first failure.
    ///
    /// Keys not declared by the schema are ignored.
    pub fn validate(&self, raw: &RawForm, today: NaiveDate) -> Result<ValidatedFields, ValidationError> {
        let mut values = HashMap::with_capacity(self.fields.len());
        for field in self.fields {
            if let Some(value) = field.check(raw.get(field.name), today)? {
                values.insert(field.name, value);
            }
        }
        Ok(ValidatedFields { values })
    }
}

/// Output of [`Schema::validate`], consumed by typed form constructors
#[derive(Debug, Clone, Default)]
pub struct ValidatedFields {
    values: HashMap<&'static str, FieldValue>,
}

impl ValidatedFields {
    fn missing(field: &'static str) -> ValidationError {
        ValidationError::new(field, format!("{field} is required"))
    }

    pub fn take_text(&mut self, field: &'static str) -> Result<String, ValidationError> {
        match self.values.remove(field) {
            Some(FieldValue::Text(s)) => Ok(s),
            _ => Err(Self::missing(field)),
        }
    }

    pub fn take_optional_text(&mut self, field: &'static str) -> Option<String> {
        match self.values.remove(field) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn take_integer(&mut self, field: &'static str) -> Result<i64, ValidationError> {
        match self.values.remove(field) {
            Some(FieldValue::Integer(n)) => Ok(n),
            _ => Err(Self::missing(field)),
        }
    }

    pub fn take_date(&mut self, field: &'static str) -> Result<NaiveDate, ValidationError> {
        match self.values.remove(field) {
            Some(FieldValue::Date(d)) => Ok(d),
            _ => Err(Self::missing(field)),
        }
    }

    pub fn take_time(&mut self, field: &'static str) -> Result<NaiveTime, ValidationError> {
        match self.values.remove(field) {
            Some(FieldValue::Time(t)) => Ok(t),
            _ => Err(Self::missing(field)),
        }
    }
}
