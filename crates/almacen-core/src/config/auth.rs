//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Secrets that ship in sample files and must never sign production tokens.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "CHANGE_ME_IN_PRODUCTION",
    "changeme",
    "secret",
    "tu_clave_secreta_para_token",
];

/// Minimum signing secret length accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). There is no default.
    #[serde(default, skip_serializing)]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds. Reserved: no flow issues refresh tokens yet.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_time_cost")]
    pub hash_time_cost: u32,
    /// Argon2 memory size in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// When set, `POST /api/auth/signup` requires an admin token.
    #[serde(default)]
    pub signup_requires_admin: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            hash_time_cost: default_hash_time_cost(),
            hash_memory_kib: default_hash_memory(),
            hash_parallelism: default_hash_parallelism(),
            password_min_length: default_password_min(),
            signup_requires_admin: false,
        }
    }
}

impl AuthConfig {
    /// Validates the section, failing on settings that would make tokens
    /// forgeable or unusable.
    pub fn validate(&self, environment: &str) -> Result<(), AppError> {
        let secret = self.jwt_secret.trim();
        if secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set (use ALMACEN__AUTH__JWT_SECRET or JWT_SECRET)",
            ));
        }

        if environment == "production" {
            if PLACEHOLDER_SECRETS
                .iter()
                .any(|p| p.eq_ignore_ascii_case(secret))
            {
                return Err(AppError::configuration(
                    "auth.jwt_secret is a placeholder value",
                ));
            }
            if secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(AppError::configuration(format!(
                    "auth.jwt_secret must be at least {MIN_PRODUCTION_SECRET_LEN} bytes in production"
                )));
            }
        }

        if self.access_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.access_token_ttl_seconds must be greater than zero",
            ));
        }

        if self.hash_time_cost == 0 || self.hash_parallelism == 0 {
            return Err(AppError::configuration(
                "auth.hash_time_cost and auth.hash_parallelism must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn default_access_ttl() -> u64 {
    86_400
}

fn default_refresh_ttl() -> u64 {
    604_800
}

fn default_hash_time_cost() -> u32 {
    3
}

fn default_hash_memory() -> u32 {
    19_456
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_password_min() -> usize {
    10
}
