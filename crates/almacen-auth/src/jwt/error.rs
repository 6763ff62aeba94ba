//! Token failure taxonomy.

use thiserror::Error;

use almacen_core::error::AppError;

/// Why a request's session token could not be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was presented.
    #[error("No token provided")]
    Missing,
    /// The signature is valid but the token is past its expiry.
    #[error("Token has expired, please sign in again")]
    Expired,
    /// Bad signature, wrong algorithm, or not a token at all.
    #[error("Invalid token")]
    Malformed,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => AppError::forbidden(err.to_string()),
            TokenError::Expired | TokenError::Malformed => AppError::unauthorized(err.to_string()),
        }
    }
}
