//! Account management: list, read, create, update, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use almacen_auth::rbac::Permission;
use almacen_auth::{PasswordHasher, PasswordValidator, RbacEnforcer};
use almacen_core::error::AppError;
use almacen_database::UserRepository;
use almacen_entity::user::model::is_valid_email;
use almacen_entity::user::{UpdateUser, User, UserFilter, UserRole};

use crate::auth::service::{NewAccount, build_create_user, hash_password};
use crate::context::RequestContext;

/// Fields accepted when an admin or coordinador creates an account.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login name.
    pub user_name: String,
    /// Email address.
    pub email: String,
    /// Initial plaintext password.
    pub password: String,
    /// Role; defaults to `auxiliar`.
    pub role: Option<UserRole>,
}

/// Partial update of an account.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New login name.
    pub user_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New plaintext password. The stored hash changes only when this is set.
    pub password: Option<String>,
    /// Raw role value exactly as sent. `Some` whenever the request carried a
    /// role field at all, even an invalid one.
    pub role: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Handles account operations on behalf of an authenticated actor.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            rbac,
        }
    }

    /// Lists accounts visible to the actor.
    ///
    /// An auxiliar only ever sees its own record; a coordinador never sees admins.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        include_inactive: bool,
    ) -> Result<Vec<User>, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserList)?;

        let filter = UserFilter {
            include_inactive,
            only_id: ctx.role.is_lowest_privilege().then_some(ctx.user_id),
        };
        let users = self.users.find_all(&filter).await?;

        Ok(users
            .into_iter()
            .filter(|u| self.rbac.require_visible(ctx.role, u.role).is_ok())
            .collect())
    }

    /// Gets a single account by id.
    pub async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserRead)?;

        let user = self.find(id).await?;
        self.rbac.require_self_access(ctx.user_id, ctx.role, id)?;
        self.rbac.require_visible(ctx.role, user.role)?;
        Ok(user)
    }

    /// Creates an account without signing it in.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        input: CreateUserInput,
    ) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserCreate)?;

        let role = input.role.unwrap_or_default();
        self.rbac.require_assignable(ctx.role, role)?;

        let data = build_create_user(&self.hasher, &self.validator, NewAccount {
            user_name: &input.user_name,
            email: &input.email,
            password: &input.password,
            role,
        })
        .await?;
        let user = self.users.create(&data).await?;

        info!(user_id = %user.id, role = %user.role, created_by = %ctx.user_id, "Account created");
        Ok(user)
    }

    /// Applies a partial update to an account.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserUpdate)?;
        self.rbac.require_self_access(ctx.user_id, ctx.role, id)?;
        self.rbac.require_no_role_change(ctx.role, input.role.is_some())?;

        let target = self.find(id).await?;
        self.rbac.require_visible(ctx.role, target.role)?;

        let role = input.role.as_deref().map(str::parse::<UserRole>).transpose()?;
        if let Some(role) = role {
            self.rbac.require_assignable(ctx.role, role)?;
        }
        if input.active == Some(false) {
            self.rbac
                .require_admin_protection(ctx.user_id, id, target.role)?;
        }

        if let Some(ref user_name) = input.user_name {
            if user_name.trim().is_empty() {
                return Err(AppError::validation("userName cannot be empty"));
            }
        }
        if let Some(ref email) = input.email {
            if !is_valid_email(email.trim()) {
                return Err(AppError::validation("email is not a valid address"));
            }
        }
        let password_hash = match input.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(hash_password(&self.hasher, password).await?)
            }
            None => None,
        };

        let changes = UpdateUser {
            user_name: input.user_name,
            email: input.email,
            password_hash,
            role,
            active: input.active,
        };
        if changes.is_empty() {
            return Ok(target);
        }

        let user = self.users.update(id, &changes).await?;
        info!(user_id = %id, updated_by = %ctx.user_id, "Account updated");
        Ok(user)
    }

    /// Deletes an account permanently, or deactivates it when `hard` is false.
    ///
    /// Returns the affected record in both cases.
    pub async fn delete_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        hard: bool,
    ) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserDelete)?;

        let target = self.find(id).await?;
        self.rbac
            .require_admin_protection(ctx.user_id, id, target.role)?;

        if hard {
            if !self.users.delete(id).await? {
                return Err(AppError::not_found(format!("User {id} not found")));
            }
            info!(user_id = %id, deleted_by = %ctx.user_id, "Account permanently deleted");
            return Ok(target);
        }

        let deactivate = UpdateUser {
            active: Some(false),
            ..UpdateUser::default()
        };
        let user = self.users.update(id, &deactivate).await?;
        info!(user_id = %id, deleted_by = %ctx.user_id, "Account deactivated");
        Ok(user)
    }

    async fn find(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
