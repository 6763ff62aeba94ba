//! # almacen-auth
//!
//! Credential and access primitives for Almacen.
//!
//! ## Modules
//!
//! - `jwt` — session token claims, issuance, verification and error taxonomy
//! - `password` — Argon2id hashing and password policy
//! - `rbac` — per-operation role allow-lists and data-dependent access rules

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
