//! JWT token creation.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use almacen_core::config::AuthConfig;
use almacen_core::error::AppError;
use almacen_entity::user::UserRole;

use super::claims::Claims;

/// Signs session tokens with the configured HMAC secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    /// Access token TTL in seconds.
    access_ttl_seconds: u64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_seconds: config.access_token_ttl_seconds,
        }
    }

    /// Issues a token for the given identity valid for `ttl_seconds`.
    pub fn issue(
        &self,
        id: Uuid,
        role: UserRole,
        email: &str,
        ttl_seconds: u64,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id,
            role,
            email: email.to_string(),
            iat: now,
            exp: now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Issues a token with the configured access-token lifetime.
    pub fn issue_access_token(
        &self,
        id: Uuid,
        role: UserRole,
        email: &str,
    ) -> Result<String, AppError> {
        self.issue(id, role, email, self.access_ttl_seconds)
    }

    /// The configured access-token lifetime.
    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds
    }
}
