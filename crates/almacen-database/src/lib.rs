//! # almacen-database
//!
//! The persistence collaborator for Almacen: repository traits, their
//! PostgreSQL implementations, an in-memory store, connection pooling and
//! embedded migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{CategoryRepository, RepositorySet, UserRepository};
