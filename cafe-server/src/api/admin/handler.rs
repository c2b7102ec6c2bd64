//! Admin API Handlers

use axum::extract::{Path, State};
use serde::Serialize;
use shared::models::{StoredBooking, StoredContactMessage, StoredSubscriber};

use crate::api::AccessToken;
use crate::audit_log;
use crate::core::ServerState;
use crate::store::{StoreError, Table, decode_rows};
use crate::utils::{ApiResponse, AppResult};

/// Rows of one admin table, tagged by table name
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "table", content = "rows", rename_all = "snake_case")]
pub enum AdminRows {
    Bookings(Vec<StoredBooking>),
    ContactMessages(Vec<StoredContactMessage>),
    Subscribers(Vec<StoredSubscriber>),
}

impl AdminRows {
    pub fn len(&self) -> usize {
        match self {
            AdminRows::Bookings(rows) => rows.len(),
            AdminRows::ContactMessages(rows) => rows.len(),
            AdminRows::Subscribers(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn admin_table(name: &str) -> AppResult<Table> {
    let table: Table = name.parse()?;
    table.ensure_writable()?;
    Ok(table)
}

/// GET /api/admin/:table - 列出表数据 (最新在前)
pub async fn list(
    State(state): State<ServerState>,
    token: AccessToken,
    Path(table): Path<String>,
) -> AppResult<ApiResponse<AdminRows>> {
    let table = admin_table(&table)?;
    let store = state.store.with_access_token(token.as_str());
    let rows = store.select_recent(table).await?;

    let rows = match table {
        Table::Bookings => AdminRows::Bookings(decode_rows(rows)?),
        Table::ContactMessages => AdminRows::ContactMessages(decode_rows(rows)?),
        Table::Subscribers => AdminRows::Subscribers(decode_rows(rows)?),
        Table::Menu | Table::Gallery => return Err(StoreError::ReadOnly(table).into()),
    };

    tracing::debug!(table = %table, count = rows.len(), "Admin rows listed");
    Ok(ApiResponse::success(rows))
}

/// DELETE /api/admin/:table/:id - 删除一行
pub async fn delete(
    State(state): State<ServerState>,
    token: AccessToken,
    Path((table, id)): Path<(String, String)>,
) -> AppResult<ApiResponse<()>> {
    let table = admin_table(&table)?;
    let store = state.store.with_access_token(token.as_str());
    store.delete_by_id(table, &id).await?;

    let resource = format!("{table}/{id}");
    audit_log!("admin", "delete", resource.as_str());

    Ok(ApiResponse::success_with_message("Item deleted successfully", ()))
}
