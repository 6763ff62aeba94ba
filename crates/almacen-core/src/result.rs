//! Convenience result type alias for Almacen.

use crate::error::AppError;

/// A specialized `Result` type for Almacen operations.
pub type AppResult<T> = Result<T, AppError>;
