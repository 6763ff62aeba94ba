//! Registration and sign-in.

pub mod service;

pub use service::{AuthOutcome, AuthService, LoginInput, RegisterInput};
