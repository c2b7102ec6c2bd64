//! Admin API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/{table} | GET | 按创建时间倒序列出 |
//! | /api/admin/{table}/{id} | DELETE | 删除一行 |
//!
//! `table` 只能是 `bookings` / `contact_messages` / `subscribers`。
//! 所有请求都需要 `Authorization: Bearer <token>`，权限由后端判定。

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub use handler::AdminRows;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{table}", get(handler::list))
        .route("/{table}/{id}", delete(handler::delete))
}
