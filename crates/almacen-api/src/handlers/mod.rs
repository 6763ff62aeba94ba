//! Route handlers, one module per resource.

pub mod auth;
pub mod category;
pub mod health;
pub mod statistics;
pub mod user;
