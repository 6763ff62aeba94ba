//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;
pub mod query;

pub use auth::{AuthUser, CurrentAccount, SignupGate};
pub use json::{JsonBody, ValidatedJson};
pub use path::IdPath;
pub use query::QueryParams;
