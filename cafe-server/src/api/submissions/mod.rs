//! Submission API 模块 - 预订 / 留言 / 订阅
//!
//! 三个表单共用同一流程：本地校验 → 写入远端表 → 返回给访客的提示。
//! 校验失败不会触达后端。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::SubmissionReceipt;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/bookings", post(handler::create_booking))
        .route("/api/contact", post(handler::create_contact_message))
        .route("/api/subscribers", post(handler::create_subscriber))
}
