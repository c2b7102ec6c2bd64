//! Data models
//!
//! Shared between cafe-server and the web front end (via API).
//! Field names follow the hosted backend's column names so rows
//! round-trip through the REST API without renaming.

pub mod booking;
pub mod contact_message;
pub mod gallery;
pub mod menu_item;
pub mod stored;
pub mod subscriber;
pub mod testimonial;

// Re-exports
pub use booking::*;
pub use contact_message::*;
pub use gallery::*;
pub use menu_item::*;
pub use stored::*;
pub use subscriber::*;
pub use testimonial::*;
