//! In-process table store

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;

use super::{StoreError, Table, TableStore};

#[derive(Debug, Default)]
struct Inner {
    tables: DashMap<Table, Vec<Value>>,
    unavailable: AtomicBool,
}

/// Table store kept in memory
///
/// Inserts get a UUID `id` and an RFC 3339 `created_at`, and
/// `subscribers.email` is unique, mirroring the hosted schema. Clones share
/// the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    inner: Arc<Inner>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a table's rows as-is (no generated columns)
    pub fn seed(&self, table: Table, rows: Vec<Value>) {
        self.inner.tables.insert(table, rows);
    }

    /// Simulate an outage: every call fails with [`StoreError::Transient`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn row_count(&self, table: Table) -> usize {
        self.inner.tables.get(&table).map(|rows| rows.len()).unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Transient("memory store marked unavailable".into()))
        } else {
            Ok(())
        }
    }
}

fn created_at(row: &Value) -> Option<DateTime<Utc>> {
    row.get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn insert(&self, table: Table, row: Value) -> Result<(), StoreError> {
        self.check_available()?;
        table.ensure_writable()?;

        let Value::Object(mut row) = row else {
            return Err(StoreError::Rejected {
                status: 400,
                message: "row must be a JSON object".into(),
            });
        };

        // Entry lock held across the uniqueness check and the push
        let mut rows = self.inner.tables.entry(table).or_default();
        if table == Table::Subscribers {
            let email = row.get("email").and_then(Value::as_str);
            let duplicate = rows
                .iter()
                .any(|existing| existing.get("email").and_then(Value::as_str) == email);
            if duplicate {
                return Err(StoreError::Conflict(
                    "duplicate key value violates unique constraint \"subscribers_email_key\""
                        .into(),
                ));
            }
        }

        row.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
        row.insert("created_at".into(), Value::String(Utc::now().to_rfc3339()));
        rows.push(Value::Object(row));
        Ok(())
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        self.check_available()?;
        Ok(self
            .inner
            .tables
            .get(&table)
            .map(|rows| rows.value().clone())
            .unwrap_or_default())
    }

    async fn select_recent(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        let mut rows = self.select_all(table).await?;
        // Later inserts first among equal timestamps
        rows.reverse();
        rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
        Ok(rows)
    }

    async fn delete_by_id(&self, table: Table, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(mut rows) = self.inner.tables.get_mut(&table) {
            rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
        }
        Ok(())
    }

    fn with_access_token(&self, _token: &str) -> Arc<dyn TableStore> {
        Arc::new(self.clone())
    }
}
