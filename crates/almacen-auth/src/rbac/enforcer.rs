//! RBAC enforcement: the coarse role check plus the data-dependent rules
//! that cannot be written as a static allow-list.
//!
//! Every check is pure. Failing a check returns `Forbidden`; the only
//! `Unauthorized` outcome is a missing role, which means no identity was
//! established in the first place.

use uuid::Uuid;

use almacen_core::error::AppError;
use almacen_entity::user::UserRole;

use super::policies::{Permission, RbacPolicies};

/// Enforces role-based access control.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Coarse gate for a request whose identity may not have been established.
    pub fn authorize(&self, role: Option<UserRole>, permission: Permission) -> Result<(), AppError> {
        match role {
            None => Err(AppError::unauthorized("Authentication required")),
            Some(role) => self.require_permission(role, permission),
        }
    }

    /// Checks whether the given role has the required permission.
    pub fn require_permission(&self, role: UserRole, permission: Permission) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission}'"
            )))
        }
    }

    /// The lowest-privilege role may only act on its own account.
    pub fn require_self_access(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        target_id: Uuid,
    ) -> Result<(), AppError> {
        if actor_role.is_lowest_privilege() && actor_id != target_id {
            return Err(AppError::forbidden("You may only access your own account"));
        }
        Ok(())
    }

    /// The lowest-privilege role may not send a role field at all.
    pub fn require_no_role_change(
        &self,
        actor_role: UserRole,
        role_field_present: bool,
    ) -> Result<(), AppError> {
        if actor_role.is_lowest_privilege() && role_field_present {
            return Err(AppError::forbidden("You are not allowed to change roles"));
        }
        Ok(())
    }

    /// A coordinador may not view or act on admin accounts.
    pub fn require_visible(&self, actor_role: UserRole, target_role: UserRole) -> Result<(), AppError> {
        if actor_role == UserRole::Coordinador && target_role.is_admin() {
            return Err(AppError::forbidden(
                "Coordinators cannot access administrator accounts",
            ));
        }
        Ok(())
    }

    /// A coordinador may not hand out the admin role.
    pub fn require_assignable(&self, actor_role: UserRole, role: UserRole) -> Result<(), AppError> {
        if actor_role == UserRole::Coordinador && role.is_admin() {
            return Err(AppError::forbidden(
                "Coordinators cannot assign the administrator role",
            ));
        }
        Ok(())
    }

    /// Deleting or deactivating an admin account is only allowed for that
    /// admin itself.
    pub fn require_admin_protection(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        target_role: UserRole,
    ) -> Result<(), AppError> {
        if target_role.is_admin() && actor_id != target_id {
            return Err(AppError::forbidden(
                "Administrator accounts can only be removed by themselves",
            ));
        }
        Ok(())
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}
