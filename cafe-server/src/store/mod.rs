//! Remote table access
//!
//! The café's data lives in a hosted PostgREST-style backend. Everything the
//! server needs from it goes through the narrow [`TableStore`] interface:
//!
//! - [`RestTableStore`] - reqwest client speaking the REST wire protocol
//! - [`MemoryTableStore`] - in-process fake used when no backend is
//!   configured, and by tests
//!
//! Rows cross this boundary as JSON objects; typed decoding happens at the
//! call site via [`decode_rows`].

mod memory;
mod rest;

pub use memory::MemoryTableStore;
pub use rest::RestTableStore;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Remote tables known to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Bookings,
    ContactMessages,
    Subscribers,
    Menu,
    Gallery,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Bookings,
        Table::ContactMessages,
        Table::Subscribers,
        Table::Menu,
        Table::Gallery,
    ];

    /// Remote table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Bookings => "bookings",
            Table::ContactMessages => "contact_messages",
            Table::Subscribers => "subscribers",
            Table::Menu => "menu",
            Table::Gallery => "gallery",
        }
    }

    /// Whether visitors may insert into this table
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            Table::Bookings | Table::ContactMessages | Table::Subscribers
        )
    }

    pub(crate) fn ensure_writable(self) -> Result<(), StoreError> {
        if self.is_writable() {
            Ok(())
        } else {
            Err(StoreError::ReadOnly(self))
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| StoreError::UnknownTable(s.to_string()))
    }
}

/// Store failures, classified so callers can tell a duplicate apart from an
/// outage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Unique constraint violated (PostgreSQL `23505`)
    #[error("duplicate row: {0}")]
    Conflict(String),

    /// Network failure, timeout or 5xx; retryable
    #[error("backend unavailable: {0}")]
    Transient(String),

    /// The backend refused the request (4xx other than a conflict)
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("table {0} is read-only")]
    ReadOnly(Table),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("malformed row: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            StoreError::Transient(msg) => AppError::unavailable(msg),
            StoreError::Rejected { status: 401, message } => {
                AppError::with_message(ErrorCode::TokenInvalid, message)
            }
            StoreError::Rejected { status: 403, message } => AppError::permission_denied(message),
            StoreError::Rejected { status: 404, message } => {
                AppError::with_message(ErrorCode::NotFound, message)
            }
            StoreError::Rejected { message, .. } => AppError::backend(message),
            StoreError::ReadOnly(table) => AppError::with_message(
                ErrorCode::TableReadOnly,
                format!("Table {table} is read-only"),
            ),
            StoreError::UnknownTable(name) => AppError::not_found(format!("Table {name}")),
            StoreError::Decode(msg) => AppError::backend(msg),
        }
    }
}

/// Narrow repository over the remote tables
#[async_trait]
pub trait TableStore: Send + Sync + fmt::Debug {
    /// Insert one row into a writable table
    async fn insert(&self, table: Table, row: Value) -> Result<(), StoreError>;

    /// Every row, in backend order
    async fn select_all(&self, table: Table) -> Result<Vec<Value>, StoreError>;

    /// Every row, newest `created_at` first
    async fn select_recent(&self, table: Table) -> Result<Vec<Value>, StoreError>;

    /// Delete by primary key; deleting a missing id is not an error
    async fn delete_by_id(&self, table: Table, id: &str) -> Result<(), StoreError>;

    /// Same store acting with a signed-in user's access token
    fn with_access_token(&self, token: &str) -> Arc<dyn TableStore>;
}

/// Decode JSON rows into `T`, failing on the first malformed row
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| StoreError::Decode(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::GalleryImage;

    #[test]
    fn test_table_names_round_trip() {
        for table in Table::ALL {
            assert_eq!(table.name().parse::<Table>(), Ok(table));
        }
        assert_eq!(
            "orders".parse::<Table>(),
            Err(StoreError::UnknownTable("orders".into()))
        );
    }

    #[test]
    fn test_only_submission_tables_are_writable() {
        assert!(Table::Bookings.is_writable());
        assert!(Table::ContactMessages.is_writable());
        assert!(Table::Subscribers.is_writable());
        assert_eq!(
            Table::Menu.ensure_writable(),
            Err(StoreError::ReadOnly(Table::Menu))
        );
        assert!(Table::Gallery.ensure_writable().is_err());
    }

    #[test]
    fn test_store_errors_map_to_app_errors() {
        let cases = [
            (StoreError::Conflict("dup".into()), ErrorCode::AlreadyExists),
            (StoreError::Transient("down".into()), ErrorCode::BackendUnavailable),
            (
                StoreError::Rejected { status: 401, message: "jwt expired".into() },
                ErrorCode::TokenInvalid,
            ),
            (
                StoreError::Rejected { status: 403, message: "rls".into() },
                ErrorCode::PermissionDenied,
            ),
            (StoreError::ReadOnly(Table::Menu), ErrorCode::TableReadOnly),
            (StoreError::UnknownTable("orders".into()), ErrorCode::NotFound),
            (
                StoreError::Rejected { status: 400, message: "bad column".into() },
                ErrorCode::BackendError,
            ),
            (StoreError::Decode("expected array".into()), ErrorCode::BackendError),
        ];
        for (err, code) in cases {
            assert_eq!(AppError::from(err).code, code);
        }
    }

    #[test]
    fn test_decode_rows_reports_bad_row() {
        let rows = vec![
            json!({"id": "g1", "image_url": "/a.jpg"}),
            json!({"id": 7}),
        ];
        let err = decode_rows::<GalleryImage>(rows).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
