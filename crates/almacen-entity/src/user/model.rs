//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::ValidateEmail;

use super::role::UserRole;

/// A registered account.
///
/// `user_name` and `email` are unique across all accounts, active or not.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name, trimmed.
    pub user_name: String,
    /// Unique email address, trimmed and lowercased.
    pub email: String,
    /// Argon2 password hash. Never serialized.
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Soft-delete flag.
    pub active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether a password hash is present on the loaded record.
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name.
    pub user_name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}

impl CreateUser {
    /// Builds a creation payload, normalizing the unique fields.
    pub fn new(user_name: &str, email: &str, password_hash: String, role: UserRole) -> Self {
        Self {
            user_name: normalize_user_name(user_name),
            email: normalize_email(email),
            password_hash,
            role,
        }
    }
}

/// Partial update of a user. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New login name.
    pub user_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password hash; only set when the password itself changed.
    pub password_hash: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New active flag.
    pub active: Option<bool>,
}

impl UpdateUser {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
            && self.active.is_none()
    }

    /// Applies the non-`None` fields to `user`, normalizing unique fields.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref user_name) = self.user_name {
            user.user_name = normalize_user_name(user_name);
        }
        if let Some(ref email) = self.email {
            user.email = normalize_email(email);
        }
        if let Some(ref hash) = self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(active) = self.active {
            user.active = active;
        }
    }
}

/// Filter for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Include soft-deleted accounts.
    pub include_inactive: bool,
    /// Restrict the result to a single account.
    pub only_id: Option<Uuid>,
}

impl UserFilter {
    /// Whether `user` passes this filter.
    pub fn matches(&self, user: &User) -> bool {
        if !self.include_inactive && !user.active {
            return false;
        }
        match self.only_id {
            Some(id) => user.id == id,
            None => true,
        }
    }
}

/// Trims surrounding whitespace from a login name.
pub fn normalize_user_name(user_name: &str) -> String {
    user_name.trim().to_string()
}

/// Trims and lowercases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The one address rule for signup, creation and update: an HTML5-style
/// address whose domain also carries a dot.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}
