//! Stored row wrapper

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingRequest, ContactMessage, SubscriberEmail};

/// A row read back from a writable table, with backend-generated columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

pub type StoredBooking = Stored<BookingRequest>;
pub type StoredContactMessage = Stored<ContactMessage>;
pub type StoredSubscriber = Stored<SubscriberEmail>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flattened_row() {
        let json = r#"{
            "id": "3f2a",
            "email": "a@b.co",
            "created_at": "2026-10-01T09:15:00.123456+00:00"
        }"#;
        let row: StoredSubscriber = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, "3f2a");
        assert_eq!(row.record.email, "a@b.co");
    }
}
