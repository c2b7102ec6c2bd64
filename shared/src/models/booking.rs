//! Booking Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Table reservation, produced only by the booking schema
///
/// `message` serializes as `null` when absent so the inserted row matches
/// what the backend expects for an empty optional column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Always within 1..=20
    pub guests: u8,
    pub message: Option<String>,
}
