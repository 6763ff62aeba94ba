//! PostgreSQL user repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use almacen_core::error::{AppError, ErrorKind};
use almacen_core::result::AppResult;
use almacen_entity::user::model::{normalize_email, normalize_user_name};
use almacen_entity::user::{CreateUser, UpdateUser, User, UserFilter};

use super::UserRepository;

/// User repository over a `users` table.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate unique-constraint violations into conflicts.
fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_user_name_key") => {
            AppError::conflict("Username already exists")
        }
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
            AppError::conflict("Email already in use")
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} user"), e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_login(
        &self,
        user_name: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let user_name = user_name.map(normalize_user_name);
        let email = email.map(normalize_email);
        if user_name.is_none() && email.is_none() {
            return Ok(None);
        }

        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE user_name = $1 OR email = $2 \
             ORDER BY (user_name = $1) DESC NULLS LAST LIMIT 1",
        )
        .bind(user_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by login", e))
    }

    async fn find_all(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE ($1 OR active) AND ($2::uuid IS NULL OR id = $2) \
             ORDER BY created_at DESC",
        )
        .bind(filter.include_inactive)
        .bind(filter.only_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, user_name, email, password_hash, role, active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $6) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.user_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET user_name = COALESCE($2, user_name), \
                              email = COALESCE($3, email), \
                              password_hash = COALESCE($4, password_hash), \
                              role = COALESCE($5, role), \
                              active = COALESCE($6, active), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.user_name.as_deref().map(normalize_user_name))
        .bind(data.email.as_deref().map(normalize_email))
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, only_active: bool) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE NOT $1 OR active")
            .bind(only_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(total as u64)
    }
}
