//! Submission Gateway - 把已校验的表单写入远端表
//!
//! One validated record, one insert, no retry. The result is one of three
//! outcomes the visitor can act on: accepted, already on file, or failed
//! (with input kept so they can resubmit).

use std::sync::Arc;

use serde::Serialize;
use shared::models::{BookingRequest, ContactMessage, SubscriberEmail};
use shared::validation::Form;
use thiserror::Error;

use crate::store::{StoreError, Table, TableStore};

/// Successful submission outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Accepted,
    /// Rejected by a uniqueness constraint; not a failure
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Network, timeout or backend outage; resubmitting may succeed
    #[error("backend unavailable: {0}")]
    Transient(String),

    #[error("submission failed: {0}")]
    Unknown(String),
}

/// Title/description pair shown to the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

/// The three public forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Booking,
    Contact,
    Subscriber,
}

impl SubmissionKind {
    pub fn table(&self) -> Table {
        match self {
            SubmissionKind::Booking => Table::Bookings,
            SubmissionKind::Contact => Table::ContactMessages,
            SubmissionKind::Subscriber => Table::Subscribers,
        }
    }

    pub fn notice(&self, outcome: SubmitOutcome) -> Notice {
        match (self, outcome) {
            (SubmissionKind::Booking, SubmitOutcome::Accepted) => {
                Notice::new("Booking Received!", "We'll confirm your reservation shortly.")
            }
            (SubmissionKind::Contact, SubmitOutcome::Accepted) => {
                Notice::new("Message Sent!", "We'll get back to you soon.")
            }
            (SubmissionKind::Subscriber, SubmitOutcome::Accepted) => Notice::new(
                "Subscribed!",
                "Thank you for subscribing to our newsletter.",
            ),
            (SubmissionKind::Subscriber, SubmitOutcome::AlreadyExists) => {
                Notice::new("Already Subscribed", "This email is already on our list!")
            }
            (_, SubmitOutcome::AlreadyExists) => {
                Notice::new("Already Received", "We already have this request on file.")
            }
        }
    }

    pub fn failure_notice(&self) -> Notice {
        match self {
            SubmissionKind::Booking => {
                Notice::new("Error", "Failed to submit booking. Please try again.")
            }
            SubmissionKind::Contact => {
                Notice::new("Error", "Failed to send message. Please try again.")
            }
            SubmissionKind::Subscriber => {
                Notice::new("Error", "Failed to subscribe. Please try again.")
            }
        }
    }

    /// Title shown above a field-level validation message
    pub fn invalid_title(&self) -> &'static str {
        match self {
            SubmissionKind::Subscriber => "Invalid Email",
            _ => "Validation Error",
        }
    }
}

/// A validated form that can be written to its table
pub trait Submission: Form + Serialize + Send + Sync {
    const KIND: SubmissionKind;
}

impl Submission for BookingRequest {
    const KIND: SubmissionKind = SubmissionKind::Booking;
}

impl Submission for ContactMessage {
    const KIND: SubmissionKind = SubmissionKind::Contact;
}

impl Submission for SubscriberEmail {
    const KIND: SubmissionKind = SubmissionKind::Subscriber;
}

#[derive(Debug, Clone)]
pub struct SubmissionGateway {
    store: Arc<dyn TableStore>,
}

impl SubmissionGateway {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Insert one validated record into its table
    pub async fn submit<S: Submission>(&self, record: &S) -> Result<SubmitOutcome, SubmitError> {
        let kind = S::KIND;
        let row = serde_json::to_value(record).map_err(|e| SubmitError::Unknown(e.to_string()))?;

        match self.store.insert(kind.table(), row).await {
            Ok(()) => {
                tracing::info!(kind = ?kind, "Submission accepted");
                Ok(SubmitOutcome::Accepted)
            }
            Err(StoreError::Conflict(reason)) => {
                tracing::info!(kind = ?kind, reason = %reason, "Submission already on file");
                Ok(SubmitOutcome::AlreadyExists)
            }
            Err(StoreError::Transient(reason)) => {
                tracing::warn!(kind = ?kind, reason = %reason, "Submission failed, backend unavailable");
                Err(SubmitError::Transient(reason))
            }
            Err(e) => {
                tracing::error!(kind = ?kind, error = %e, "Submission failed");
                Err(SubmitError::Unknown(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTableStore;
    use async_trait::async_trait;
    use serde_json::Value;

    /// Refuses every insert with a non-conflict 4xx
    #[derive(Debug)]
    struct RefusingStore;

    #[async_trait]
    impl TableStore for RefusingStore {
        async fn insert(&self, _table: Table, _row: Value) -> Result<(), StoreError> {
            Err(StoreError::Rejected {
                status: 400,
                message: "invalid input syntax for type date".into(),
            })
        }

        async fn select_all(&self, _table: Table) -> Result<Vec<Value>, StoreError> {
            Ok(Vec::new())
        }

        async fn select_recent(&self, _table: Table) -> Result<Vec<Value>, StoreError> {
            Ok(Vec::new())
        }

        async fn delete_by_id(&self, _table: Table, _id: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn with_access_token(&self, _token: &str) -> Arc<dyn TableStore> {
            Arc::new(RefusingStore)
        }
    }

    fn subscriber(email: &str) -> SubscriberEmail {
        SubscriberEmail {
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_subscriber_is_already_exists() {
        let store = MemoryTableStore::new();
        let gateway = SubmissionGateway::new(Arc::new(store.clone()));

        let first = gateway.submit(&subscriber("news@example.com")).await;
        let second = gateway.submit(&subscriber("news@example.com")).await;

        assert_eq!(first, Ok(SubmitOutcome::Accepted));
        assert_eq!(second, Ok(SubmitOutcome::AlreadyExists));
        assert_eq!(store.row_count(Table::Subscribers), 1);
    }

    #[tokio::test]
    async fn test_outage_is_transient() {
        let store = MemoryTableStore::new();
        store.set_unavailable(true);
        let gateway = SubmissionGateway::new(Arc::new(store));

        let result = gateway.submit(&subscriber("news@example.com")).await;
        assert!(matches!(result, Err(SubmitError::Transient(_))));
    }

    #[tokio::test]
    async fn test_rejected_insert_is_unknown_failure() {
        let gateway = SubmissionGateway::new(Arc::new(RefusingStore));

        let result = gateway.submit(&subscriber("news@example.com")).await;

        assert!(
            matches!(&result, Err(SubmitError::Unknown(reason)) if reason.contains("invalid input syntax")),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_contact_message_lands_in_its_table() {
        let store = MemoryTableStore::new();
        let gateway = SubmissionGateway::new(Arc::new(store.clone()));
        let msg = ContactMessage {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            message: "Do you cater weddings?".into(),
        };

        assert_eq!(gateway.submit(&msg).await, Ok(SubmitOutcome::Accepted));
        assert_eq!(store.row_count(Table::ContactMessages), 1);
        assert_eq!(store.row_count(Table::Bookings), 0);
    }

    #[test]
    fn test_notices_follow_site_copy() {
        assert_eq!(
            SubmissionKind::Booking.notice(SubmitOutcome::Accepted).title,
            "Booking Received!"
        );
        assert_eq!(
            SubmissionKind::Subscriber
                .notice(SubmitOutcome::AlreadyExists)
                .title,
            "Already Subscribed"
        );
        assert_eq!(
            SubmissionKind::Booking.failure_notice().description,
            "Failed to submit booking. Please try again."
        );
        assert_eq!(SubmissionKind::Subscriber.invalid_title(), "Invalid Email");
    }
}
