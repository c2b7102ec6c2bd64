//! Schemas and typed constructors for the three public forms

use chrono::NaiveDate;

use super::schema::{Field, FieldKind, RawForm, Schema, ValidatedFields};
use super::ValidationError;
use crate::models::{BookingRequest, ContactMessage, SubscriberEmail};

const NAME: Field = Field::required(
    "name",
    "Name",
    FieldKind::Text {
        min: 2,
        max: 100,
        min_message: "Name must be at least 2 characters",
        max_message: "Name must be at most 100 characters",
    },
)
.with_required_message("Name is required");

const EMAIL: Field = Field::required(
    "email",
    "Email",
    FieldKind::Email {
        max: 255,
        max_message: "Email must be at most 255 characters",
    },
)
.with_required_message("Invalid email address");

pub static BOOKING_SCHEMA: Schema = Schema {
    name: "booking",
    fields: &[
        NAME,
        Field::required("phone", "Phone", FieldKind::Phone)
            .with_required_message("Invalid phone number"),
        EMAIL,
        Field::required("date", "Date", FieldKind::Date { not_in_past: true })
            .with_required_message("Date is required"),
        Field::required("time", "Time", FieldKind::Time).with_required_message("Time is required"),
        Field::required(
            "guests",
            "Guests",
            FieldKind::Integer {
                min: 1,
                max: 20,
                min_message: "At least 1 guest required",
                max_message: "Maximum 20 guests",
            },
        )
        .with_required_message("Number of guests is required"),
        Field::optional(
            "message",
            "Message",
            FieldKind::Text {
                min: 0,
                max: 500,
                min_message: "",
                max_message: "Message must be at most 500 characters",
            },
        ),
    ],
};

pub static CONTACT_SCHEMA: Schema = Schema {
    name: "contact",
    fields: &[
        NAME,
        EMAIL,
        Field::required(
            "message",
            "Message",
            FieldKind::Text {
                min: 10,
                max: 1000,
                min_message: "Message must be at least 10 characters",
                max_message: "Message must be at most 1000 characters",
            },
        )
        .with_required_message("Message must be at least 10 characters"),
    ],
};

pub static SUBSCRIBER_SCHEMA: Schema = Schema {
    name: "subscriber",
    fields: &[EMAIL],
};

/// A typed form built from its schema's validated fields
pub trait Form: Sized {
    fn schema() -> &'static Schema;

    fn from_fields(fields: ValidatedFields) -> Result<Self, ValidationError>;
}

/// Validate `raw` against `F`'s schema and build the typed form.
///
/// `today` anchors the "date not in the past" rule; callers pass the
/// restaurant's local date.
pub fn validate_form<F: Form>(raw: &RawForm, today: NaiveDate) -> Result<F, ValidationError> {
    let fields = F::schema().validate(raw, today)?;
    F::from_fields(fields)
}

impl Form for BookingRequest {
    fn schema() -> &'static Schema {
        &BOOKING_SCHEMA
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        let guests = fields.take_integer("guests")?;
        let guests = u8::try_from(guests)
            .map_err(|_| ValidationError::new("guests", "Maximum 20 guests"))?;

        Ok(Self {
            name: fields.take_text("name")?,
            phone: fields.take_text("phone")?,
            email: fields.take_text("email")?,
            date: fields.take_date("date")?,
            time: fields.take_time("time")?,
            guests,
            message: fields.take_optional_text("message"),
        })
    }
}

impl Form for ContactMessage {
    fn schema() -> &'static Schema {
        &CONTACT_SCHEMA
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.take_text("name")?,
            email: fields.take_text("email")?,
            message: fields.take_text("message")?,
        })
    }
}

impl Form for SubscriberEmail {
    fn schema() -> &'static Schema {
        &SUBSCRIBER_SCHEMA
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            email: fields.take_text("email")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use serde_json::{Value, json};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_booking() -> Value {
        json!({
            "name": "Rahul Kumar",
            "phone": "+918445640120",
            "email": "rahul@example.com",
            "date": "2026-10-20",
            "time": "19:30",
            "guests": 4,
            "message": "Window seat please"
        })
    }

    fn booking_with(field: &str, value: Value) -> RawForm {
        let mut raw = valid_booking().as_object().cloned().unwrap();
        raw.insert(field.to_string(), value);
        raw
    }

    #[test]
    fn test_valid_booking_is_normalized() {
        let raw = valid_booking().as_object().cloned().unwrap();
        let booking: BookingRequest = validate_form(&raw, today()).unwrap();

        assert_eq!(booking.guests, 4);
        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(booking.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(booking.message.as_deref(), Some("Window seat please"));
    }

    #[test]
    fn test_booking_message_coalesces_to_absent() {
        for empty in [json!(""), Value::Null] {
            let raw = booking_with("message", empty);
            let booking: BookingRequest = validate_form(&raw, today()).unwrap();
            assert_eq!(booking.message, None);
        }

        let mut raw = valid_booking().as_object().cloned().unwrap();
        raw.remove("message");
        let booking: BookingRequest = validate_form(&raw, today()).unwrap();
        assert_eq!(booking.message, None);
    }

    #[test]
    fn test_booking_guests_from_string_and_bounds() {
        let booking: BookingRequest =
            validate_form(&booking_with("guests", json!("20")), today()).unwrap();
        assert_eq!(booking.guests, 20);

        let booking: BookingRequest =
            validate_form(&booking_with("guests", json!(1)), today()).unwrap();
        assert_eq!(booking.guests, 1);
    }

    #[test]
    fn test_booking_today_is_allowed() {
        let booking: BookingRequest =
            validate_form(&booking_with("date", json!("2026-10-18")), today()).unwrap();
        assert_eq!(booking.date, today());
    }

    #[test]
    fn test_each_invalid_booking_field_is_reported() {
        let cases: [(&str, Value, &str); 9] = [
            ("name", json!("R"), "Name must be at least 2 characters"),
            ("phone", json!("12345"), "Invalid phone number"),
            ("email", json!("rahul-at-example"), "Invalid email address"),
            ("date", json!("2026-10-17"), "Date cannot be in the past"),
            ("date", json!(""), "Date is required"),
            ("time", json!(""), "Time is required"),
            ("guests", json!(0), "At least 1 guest required"),
            ("guests", json!(21), "Maximum 20 guests"),
            ("message", json!("x".repeat(501)), "Message must be at most 500 characters"),
        ];

        for (field, value, message) in cases {
            let raw = booking_with(field, value);
            let err = validate_form::<BookingRequest>(&raw, today()).unwrap_err();
            assert_eq!(err.field, field, "case {field}: {message}");
            assert_eq!(err.message, message);
        }
    }

    #[test]
    fn test_booking_name_too_long() {
        let raw = booking_with("name", json!("a".repeat(101)));
        let err = validate_form::<BookingRequest>(&raw, today()).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Name must be at most 100 characters");
    }

    #[test]
    fn test_email_format_checked_before_length() {
        let long_local = format!("{}@example.com", "a".repeat(250));
        let raw = booking_with("email", json!(long_local));
        let err = validate_form::<BookingRequest>(&raw, today()).unwrap_err();
        assert_eq!(err.field, "email");
    }

    #[test]
    fn test_valid_contact_message() {
        let raw = json!({
            "name": "Anjali",
            "email": "anjali@example.com",
            "message": "Are you open on Diwali?"
        });
        let msg: ContactMessage =
            validate_form(raw.as_object().unwrap(), today()).unwrap();
        assert_eq!(msg.message, "Are you open on Diwali?");
    }

    #[test]
    fn test_contact_message_too_short() {
        let raw = json!({
            "name": "Anjali",
            "email": "anjali@example.com",
            "message": "Hi"
        });
        let err = validate_form::<ContactMessage>(raw.as_object().unwrap(), today()).unwrap_err();
        assert_eq!(err.field, "message");
        assert_eq!(err.message, "Message must be at least 10 characters");
    }

    #[test]
    fn test_subscriber_email() {
        let raw = json!({"email": "news@example.com"});
        let sub: SubscriberEmail = validate_form(raw.as_object().unwrap(), today()).unwrap();
        assert_eq!(sub.email, "news@example.com");

        let raw = json!({"email": "nope"});
        let err = validate_form::<SubscriberEmail>(raw.as_object().unwrap(), today()).unwrap_err();
        assert_eq!(err.message, "Invalid email address");

        let err = validate_form::<SubscriberEmail>(&RawForm::new(), today()).unwrap_err();
        assert_eq!(err.field, "email");
    }
}
