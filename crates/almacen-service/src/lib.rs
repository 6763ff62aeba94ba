//! # almacen-service
//!
//! Business logic for Almacen. Each service receives its repositories and
//! auth primitives through its constructor and never reads configuration
//! on its own.

pub mod auth;
pub mod category;
pub mod context;
pub mod statistics;
pub mod user;

pub use auth::AuthService;
pub use category::CategoryService;
pub use context::RequestContext;
pub use statistics::StatisticsService;
pub use user::UserService;
