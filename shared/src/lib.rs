//! Shared types for the café site
//!
//! Domain models, form validation, the menu catalog engine, the testimonial
//! carousel and the error/response envelope used by the server.

pub mod carousel;
pub mod catalog;
pub mod error;
pub mod models;
pub mod validation;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use carousel::{Carousel, CarouselError};
pub use catalog::{CatalogPage, CatalogQuery, CategoryGroup, ImageOverrides, filter_catalog};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use validation::{Form, ValidationError, validate_form};
