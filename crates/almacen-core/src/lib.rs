//! # almacen-core
//!
//! Core crate for the Almacen inventory backend. Contains the configuration
//! schemas and loader, and the unified error system shared by every other
//! crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Almacen crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::AppError;
pub use result::AppResult;
