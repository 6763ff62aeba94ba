//! # almacen-entity
//!
//! Domain entity models for Almacen. Every struct in this crate represents
//! a stored record or the payload used to create or change one. Stored
//! entities additionally derive `sqlx::FromRow`.

pub mod category;
pub mod user;
