//! Category CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use almacen_auth::RbacEnforcer;
use almacen_auth::rbac::Permission;
use almacen_core::error::AppError;
use almacen_database::CategoryRepository;
use almacen_entity::category::{Category, CreateCategory, UpdateCategory};

use crate::context::RequestContext;

/// Fields accepted when creating a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    /// Name, unique after trimming.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Partial update of a category.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Handles category operations. Reads are public; writes are role-gated.
#[derive(Debug, Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { categories, rbac }
    }

    /// Lists categories, newest first.
    pub async fn list_categories(&self, include_inactive: bool) -> Result<Vec<Category>, AppError> {
        self.categories.find_all(include_inactive).await
    }

    /// Gets a single category by id.
    pub async fn get_category(&self, id: Uuid) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a category.
    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::CategoryCreate)?;

        let data = CreateCategory {
            name: required("name", &input.name)?,
            description: required("description", &input.description)?,
        };
        let category = self.categories.create(&data).await?;

        info!(category_id = %category.id, created_by = %ctx.user_id, "Category created");
        Ok(category)
    }

    /// Applies a partial update to a category.
    pub async fn update_category(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<Category, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::CategoryUpdate)?;

        let changes = UpdateCategory {
            name: input.name.as_deref().map(|n| required("name", n)).transpose()?,
            description: input
                .description
                .as_deref()
                .map(|d| required("description", d))
                .transpose()?,
            active: input.active,
        };
        let category = self.categories.update(id, &changes).await?;

        info!(category_id = %id, updated_by = %ctx.user_id, "Category updated");
        Ok(category)
    }

    /// Deletes a category permanently, or deactivates it when `hard` is false.
    pub async fn delete_category(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        hard: bool,
    ) -> Result<Category, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::CategoryDelete)?;

        let category = self.get_category(id).await?;
        if hard {
            if !self.categories.delete(id).await? {
                return Err(AppError::not_found("Category not found"));
            }
            info!(category_id = %id, deleted_by = %ctx.user_id, "Category permanently deleted");
            return Ok(category);
        }

        let deactivate = UpdateCategory {
            active: Some(false),
            ..UpdateCategory::default()
        };
        let category = self.categories.update(id, &deactivate).await?;
        info!(category_id = %id, deleted_by = %ctx.user_id, "Category deactivated");
        Ok(category)
    }
}

/// Trims `value`, rejecting it when nothing is left.
fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
