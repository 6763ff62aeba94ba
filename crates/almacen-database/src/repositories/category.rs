//! PostgreSQL category repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use almacen_core::error::{AppError, ErrorKind};
use almacen_core::result::AppResult;
use almacen_entity::category::{Category, CreateCategory, UpdateCategory};

use super::CategoryRepository;

/// Category repository over a `categories` table.
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("categories_name_key") => {
            AppError::conflict("Category name already exists")
        }
        _ => AppError::with_source(
            ErrorKind::Database,
            format!("Failed to {action} category"),
            e,
        ),
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn find_all(&self, include_inactive: bool) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE $1 OR active ORDER BY created_at DESC",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let now = Utc::now();
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, description, active, created_at, updated_at) \
             VALUES ($1, $2, $3, TRUE, $4, $4) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.name.trim())
        .bind(data.description.trim())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))
    }

    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = COALESCE($2, name), \
                                   description = COALESCE($3, description), \
                                   active = COALESCE($4, active), \
                                   updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.name.as_deref().map(str::trim))
        .bind(data.description.as_deref().map(str::trim))
        .bind(data.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, only_active: bool) -> AppResult<u64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE NOT $1 OR active")
                .bind(only_active)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count categories", e)
                })?;
        Ok(total as u64)
    }
}
