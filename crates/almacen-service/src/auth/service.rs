//! Registration and login.

use std::sync::Arc;

use tracing::{error, info, warn};

use almacen_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use almacen_core::error::AppError;
use almacen_database::UserRepository;
use almacen_entity::user::model::is_valid_email;
use almacen_entity::user::{CreateUser, User, UserRole};

/// Fields accepted by registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Desired login name.
    pub user_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role; defaults to `auxiliar`.
    pub role: Option<UserRole>,
}

/// Fields accepted by login. Either `user_name` or `email` identifies the account.
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    /// Login name.
    pub user_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// A sanitized account plus a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The account. Its password hash is never serialized.
    pub user: User,
    /// Signed session token.
    pub token: String,
}

/// Handles registration and login.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
        }
    }

    /// Registers a new account and signs it in.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthOutcome, AppError> {
        let data = build_create_user(&self.hasher, &self.validator, NewAccount {
            user_name: &input.user_name,
            email: &input.email,
            password: &input.password,
            role: input.role.unwrap_or_default(),
        })
        .await?;

        let user = self.users.create(&data).await?;
        let token = self
            .encoder
            .issue_access_token(user.id, user.role, &user.email)?;

        info!(user_id = %user.id, role = %user.role, "Account registered");
        Ok(AuthOutcome { user, token })
    }

    /// Authenticates by username or email plus password.
    pub async fn login(&self, input: LoginInput) -> Result<AuthOutcome, AppError> {
        let user_name = non_blank(input.user_name.as_deref());
        let email = non_blank(input.email.as_deref());
        if user_name.is_none() && email.is_none() {
            return Err(AppError::validation("userName or email is required"));
        }
        let password = input
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::validation("password is required"))?;

        let Some(user) = self.users.find_by_login(user_name, email).await? else {
            info!(login = user_name.or(email).unwrap_or_default(), "Login failed: account not found");
            return Err(AppError::not_found("User not found"));
        };

        if !user.has_password() {
            error!(user_id = %user.id, "Account has no password hash");
            return Err(AppError::internal("Account has no password hash"));
        }

        if !verify_password(&self.hasher, password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login failed: incorrect password");
            return Err(AppError::unauthorized("Incorrect password"));
        }

        if !user.active {
            warn!(user_id = %user.id, "Login failed: account deactivated");
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        let token = self
            .encoder
            .issue_access_token(user.id, user.role, &user.email)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(AuthOutcome { user, token })
    }
}

/// Borrowed account fields shared by registration and admin creation.
pub(crate) struct NewAccount<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: UserRole,
}

/// Validates the account fields and hashes the password.
pub(crate) async fn build_create_user(
    hasher: &Arc<PasswordHasher>,
    validator: &PasswordValidator,
    account: NewAccount<'_>,
) -> Result<CreateUser, AppError> {
    if account.user_name.trim().is_empty() {
        return Err(AppError::validation("userName is required"));
    }
    let email = account.email.trim();
    if email.is_empty() {
        return Err(AppError::validation("email is required"));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation("email is not a valid address"));
    }
    validator.validate(account.password)?;

    let hash = hash_password(hasher, account.password).await?;
    Ok(CreateUser::new(
        account.user_name,
        email,
        hash,
        account.role,
    ))
}

/// Hashes on the blocking pool so request workers stay free.
pub(crate) async fn hash_password(
    hasher: &Arc<PasswordHasher>,
    password: &str,
) -> Result<String, AppError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

async fn verify_password(
    hasher: &Arc<PasswordHasher>,
    password: &str,
    hash: &str,
) -> Result<bool, AppError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
