//! Testimonial API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/testimonials | GET | 全部评价 + 当前轮播位置 |
//! | /api/testimonials/next | POST | 下一条 (关闭自动轮播) |
//! | /api/testimonials/previous | POST | 上一条 (关闭自动轮播) |
//! | /api/testimonials/select/{index} | POST | 跳转到指定位置 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::TestimonialView;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/testimonials", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/next", post(handler::next))
        .route("/previous", post(handler::previous))
        .route("/select/{index}", post(handler::select))
}
