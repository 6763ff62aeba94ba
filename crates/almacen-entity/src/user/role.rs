//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Privilege is informally ordered Admin > Coordinador > Auxiliar, but
/// capabilities are always checked through explicit allow-lists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access, including user deletion.
    Admin,
    /// Manages inventory data and non-admin users.
    Coordinador,
    /// Limited access; may only act on its own account.
    #[default]
    Auxiliar,
}

impl UserRole {
    /// Every role, highest privilege first.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Coordinador, Self::Auxiliar];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this is the lowest-privilege role.
    pub fn is_lowest_privilege(&self) -> bool {
        matches!(self, Self::Auxiliar)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coordinador => "coordinador",
            Self::Auxiliar => "auxiliar",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = almacen_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "coordinador" => Ok(Self::Coordinador),
            "auxiliar" => Ok(Self::Auxiliar),
            _ => Err(almacen_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, coordinador, auxiliar"
            ))),
        }
    }
}
