//! 服务层
//!
//! # 服务列表
//!
//! - [`SubmissionGateway`] - 表单提交 (bookings / contact / subscribers)
//! - [`MenuCache`] - 菜单缓存，[`MenuRefresher`] 定时刷新
//! - [`TestimonialRotator`] - 评价轮播定时器

pub mod gateway;
pub mod menu_cache;
pub mod rotator;

pub use gateway::{Notice, Submission, SubmissionGateway, SubmissionKind, SubmitError, SubmitOutcome};
pub use menu_cache::{MenuCache, MenuRefresher, RefreshOutcome};
pub use rotator::{SharedCarousel, TestimonialRotator, testimonial_carousel};
