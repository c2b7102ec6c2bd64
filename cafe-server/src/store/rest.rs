//! REST table store
//!
//! Speaks the PostgREST dialect used by the hosted backend:
//!
//! | 操作 | 请求 |
//! |------|------|
//! | insert | `POST /rest/v1/{table}` |
//! | select_all | `GET /rest/v1/{table}?select=*` |
//! | select_recent | `GET /rest/v1/{table}?select=*&order=created_at.desc` |
//! | delete_by_id | `DELETE /rest/v1/{table}?id=eq.{id}` |
//!
//! Every request carries `apikey` and `Authorization: Bearer` headers. The
//! bearer is the anon key unless a user token was attached with
//! [`TableStore::with_access_token`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{StoreError, Table, TableStore};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Error body returned by the backend
#[derive(Debug, Default, Deserialize)]
struct BackendError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestTableStore {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RestTableStore {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transient(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &body))
    }

    async fn select(&self, table: Table, order_recent: bool) -> Result<Vec<Value>, StoreError> {
        let mut request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")]);
        if order_recent {
            request = request.query(&[("order", "created_at.desc")]);
        }

        self.send(request)
            .await?
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn classify_send_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Transient(format!("request timed out: {err}"))
    } else if err.is_connect() || err.is_request() {
        StoreError::Transient(format!("connection failed: {err}"))
    } else {
        StoreError::Rejected {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

/// Map a non-success response onto [`StoreError`]
fn classify_status(status: StatusCode, body: &str) -> StoreError {
    let parsed: BackendError = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    if parsed.code.as_deref() == Some(UNIQUE_VIOLATION) {
        return StoreError::Conflict(message);
    }
    if status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        return StoreError::Transient(format!("{status}: {message}"));
    }
    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn insert(&self, table: Table, row: Value) -> Result<(), StoreError> {
        table.ensure_writable()?;

        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(&row);
        self.send(request).await?;
        tracing::debug!(table = %table, "Row inserted");
        Ok(())
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        self.select(table, false).await
    }

    async fn select_recent(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        self.select(table, true).await
    }

    async fn delete_by_id(&self, table: Table, id: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))]);
        self.send(request).await?;
        Ok(())
    }

    fn with_access_token(&self, token: &str) -> Arc<dyn TableStore> {
        let mut scoped = self.clone();
        scoped.access_token = Some(token.to_string());
        Arc::new(scoped)
    }
}
