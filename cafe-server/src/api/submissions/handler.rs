//! Submission API Handlers

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::{BookingRequest, ContactMessage, SubscriberEmail};
use shared::validation::{RawForm, validate_form};

use crate::core::ServerState;
use crate::services::{Submission, SubmissionKind, SubmitError, SubmitOutcome};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// What the visitor sees after a submission went through
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub kind: SubmissionKind,
    pub outcome: SubmitOutcome,
    pub title: &'static str,
    pub description: &'static str,
}

/// POST /api/bookings - 提交预订
pub async fn create_booking(State(state): State<ServerState>, Json(raw): Json<RawForm>) -> Response {
    submit::<BookingRequest>(&state, &raw).await
}

/// POST /api/contact - 提交留言
pub async fn create_contact_message(
    State(state): State<ServerState>,
    Json(raw): Json<RawForm>,
) -> Response {
    submit::<ContactMessage>(&state, &raw).await
}

/// POST /api/subscribers - 订阅通讯
pub async fn create_subscriber(
    State(state): State<ServerState>,
    Json(raw): Json<RawForm>,
) -> Response {
    submit::<SubscriberEmail>(&state, &raw).await
}

async fn submit<S: Submission>(state: &ServerState, raw: &RawForm) -> Response {
    let kind = S::KIND;

    let record: S = match validate_form(raw, state.today()) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(kind = ?kind, field = e.field, message = %e.message, "Form rejected");
            return AppError::from(e)
                .with_detail("title", kind.invalid_title())
                .into_response();
        }
    };

    match state.gateway.submit(&record).await {
        Ok(outcome) => receipt_response(kind, outcome),
        Err(e) => failure_response(kind, &e),
    }
}

/// Visitor-facing failure; backend error text only goes to the log
fn failure_response(kind: SubmissionKind, err: &SubmitError) -> Response {
    let code = match err {
        SubmitError::Transient(_) => ErrorCode::BackendUnavailable,
        SubmitError::Unknown(_) => ErrorCode::SubmissionFailed,
    };
    tracing::debug!(kind = ?kind, error = %err, %code, "Submission failure reported to visitor");

    let notice = kind.failure_notice();
    AppError::with_message(code, notice.description)
        .with_detail("title", notice.title)
        .into_response()
}

/// 已存在不算失败：HTTP 200，`code` 区分已存在
fn receipt_response(kind: SubmissionKind, outcome: SubmitOutcome) -> Response {
    let notice = kind.notice(outcome);
    let receipt = SubmissionReceipt {
        kind,
        outcome,
        title: notice.title,
        description: notice.description,
    };

    match outcome {
        SubmitOutcome::Accepted => {
            ApiResponse::success_with_message(notice.title, receipt).into_response()
        }
        SubmitOutcome::AlreadyExists => {
            let code = match kind {
                SubmissionKind::Subscriber => ErrorCode::SubscriberExists,
                _ => ErrorCode::AlreadyExists,
            };
            ApiResponse::outcome(code, notice.title, receipt).into_response()
        }
    }
}
