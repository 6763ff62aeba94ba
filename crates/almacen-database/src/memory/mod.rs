//! In-memory repositories for single-process deployments and tests.
//!
//! Each store keeps its records behind one Tokio `RwLock`, so uniqueness
//! checks and the write they guard happen under the same write guard.

mod category;
mod user;

pub use category::MemoryCategoryRepository;
pub use user::MemoryUserRepository;
