//! Menu API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/menu | GET | 搜索 / 素食 / 辣味筛选，按分类分组，分页加载 |
//! | /api/menu/{id} | GET | 单个菜品 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::MenuParams;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
