//! # almacen-api
//!
//! HTTP API layer for Almacen built on Axum.
//!
//! Requests pass through an explicit pipeline: the authentication stage
//! verifies the token and attaches a `RequestContext`, the role guard stage
//! checks the route's allow-list, and only then does the handler run.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
