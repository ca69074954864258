//! Common types used across the application.

pub mod pagination;
pub mod window;

pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use window::TimeWindow;
