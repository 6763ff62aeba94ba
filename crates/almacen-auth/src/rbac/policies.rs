//! Per-operation role allow-lists.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use almacen_entity::user::UserRole;

/// An operation gated by a role allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Users
    /// List accounts.
    UserList,
    /// Read one account.
    UserRead,
    /// Create an account on someone's behalf.
    UserCreate,
    /// Update an account.
    UserUpdate,
    /// Delete or deactivate an account.
    UserDelete,

    // Categories
    /// Create a category.
    CategoryCreate,
    /// Update a category.
    CategoryUpdate,
    /// Delete a category.
    CategoryDelete,

    /// Read system totals.
    StatisticsRead,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserList => "user_list",
            Self::UserRead => "user_read",
            Self::UserCreate => "user_create",
            Self::UserUpdate => "user_update",
            Self::UserDelete => "user_delete",
            Self::CategoryCreate => "category_create",
            Self::CategoryUpdate => "category_update",
            Self::CategoryDelete => "category_delete",
            Self::StatisticsRead => "statistics_read",
        };
        f.write_str(name)
    }
}

/// Whether `role` is in the allow-list.
pub fn allows(role: UserRole, allowed: &HashSet<UserRole>) -> bool {
    allowed.contains(&role)
}

/// Maps each permission to the roles allowed to exercise it.
///
/// A permission with no entry is denied to everyone.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<Permission, HashSet<UserRole>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Permission::*;
        use UserRole::{Admin, Auxiliar, Coordinador};

        let everyone = [Admin, Coordinador, Auxiliar];
        let managers = [Admin, Coordinador];
        let admin_only = [Admin];

        let mut policies = HashMap::new();
        policies.insert(UserList, HashSet::from(everyone));
        policies.insert(UserRead, HashSet::from(everyone));
        // Data-dependent rules narrow these two further.
        policies.insert(UserUpdate, HashSet::from(everyone));
        policies.insert(UserCreate, HashSet::from(managers));
        policies.insert(UserDelete, HashSet::from(admin_only));

        policies.insert(CategoryCreate, HashSet::from(everyone));
        policies.insert(CategoryUpdate, HashSet::from(managers));
        policies.insert(CategoryDelete, HashSet::from(admin_only));

        policies.insert(StatisticsRead, HashSet::from(everyone));

        Self { policies }
    }

    /// Replaces the allow-list for one permission.
    pub fn set(&mut self, permission: Permission, roles: impl IntoIterator<Item = UserRole>) {
        self.policies
            .insert(permission, roles.into_iter().collect());
    }

    /// The allow-list for `permission`, if one is defined.
    pub fn allowed_roles(&self, permission: Permission) -> Option<&HashSet<UserRole>> {
        self.policies.get(&permission)
    }

    /// Checks whether the given role may exercise `permission`.
    pub fn has_permission(&self, role: UserRole, permission: Permission) -> bool {
        self.allowed_roles(permission)
            .is_some_and(|allowed| allows(role, allowed))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
