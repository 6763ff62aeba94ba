//! Category management.

pub mod service;

pub use service::{CategoryInput, CategoryService, UpdateCategoryInput};
