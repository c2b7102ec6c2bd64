//! Testimonial API Handlers

use axum::extract::{Path, State};
use serde::Serialize;
use shared::carousel::{Carousel, CarouselError};
use shared::models::{TESTIMONIALS, Testimonial};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Testimonials plus the carousel position
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialView {
    pub testimonials: &'static [Testimonial],
    pub current: usize,
    pub auto_play: bool,
}

impl TestimonialView {
    fn from_carousel(carousel: Carousel) -> Self {
        Self {
            testimonials: &TESTIMONIALS,
            current: carousel.index(),
            auto_play: carousel.auto_play(),
        }
    }
}

fn snapshot(state: &ServerState) -> Carousel {
    *state.carousel.lock()
}

/// GET /api/testimonials - 获取评价和当前位置
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<TestimonialView>> {
    Ok(ApiResponse::success(TestimonialView::from_carousel(snapshot(&state))))
}

/// POST /api/testimonials/next - 下一条
pub async fn next(State(state): State<ServerState>) -> AppResult<ApiResponse<TestimonialView>> {
    let carousel = {
        let mut carousel = state.carousel.lock();
        carousel.next();
        *carousel
    };
    Ok(ApiResponse::success(TestimonialView::from_carousel(carousel)))
}

/// POST /api/testimonials/previous - 上一条
pub async fn previous(State(state): State<ServerState>) -> AppResult<ApiResponse<TestimonialView>> {
    let carousel = {
        let mut carousel = state.carousel.lock();
        carousel.previous();
        *carousel
    };
    Ok(ApiResponse::success(TestimonialView::from_carousel(carousel)))
}

/// POST /api/testimonials/select/:index - 跳转
pub async fn select(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
) -> AppResult<ApiResponse<TestimonialView>> {
    let carousel = {
        let mut carousel = state.carousel.lock();
        carousel.select(index).map_err(|e| match e {
            CarouselError::OutOfRange { index, len } => AppError::with_message(
                ErrorCode::TestimonialNotFound,
                format!("Testimonial {index} not found"),
            )
            .with_detail("index", index)
            .with_detail("len", len),
        })?;
        *carousel
    };
    Ok(ApiResponse::success(TestimonialView::from_carousel(carousel)))
}
