//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu`] - 菜单浏览 (搜索 / 筛选 / 加载更多)
//! - [`gallery`] - 图库
//! - [`testimonials`] - 顾客评价轮播
//! - [`submissions`] - 预订、留言、订阅表单
//! - [`admin`] - 管理后台 (需要 Bearer token)

pub mod access_token;
pub mod admin;
pub mod gallery;
pub mod health;
pub mod menu;
pub mod middleware;
pub mod submissions;
pub mod testimonials;

pub use access_token::AccessToken;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppError, AppResult};
