//! In-memory category store. Names are unique across active and inactive rows.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use almacen_core::error::AppError;
use almacen_core::result::AppResult;
use almacen_entity::category::{Category, CreateCategory, UpdateCategory};

use crate::repositories::CategoryRepository;

/// Category store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl MemoryCategoryRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(
    categories: &HashMap<Uuid, Category>,
    name: &str,
    except: Option<Uuid>,
) -> AppResult<()> {
    if categories
        .values()
        .any(|c| Some(c.id) != except && c.name == name)
    {
        return Err(AppError::conflict("Category name already exists"));
    }
    Ok(())
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_all(&self, include_inactive: bool) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .read()
            .await
            .values()
            .filter(|c| include_inactive || c.active)
            .cloned()
            .collect();
        categories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(categories)
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let name = data.name.trim().to_string();

        let mut categories = self.categories.write().await;
        check_unique(&categories, &name, None)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name,
            description: data.description.trim().to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        };
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        let mut categories = self.categories.write().await;

        let mut updated = categories
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
        data.apply_to(&mut updated);
        check_unique(&categories, &updated.name, Some(id))?;
        updated.updated_at = Utc::now();

        categories.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.categories.write().await.remove(&id).is_some())
    }

    async fn count(&self, only_active: bool) -> AppResult<u64> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .filter(|c| !only_active || c.active)
            .count() as u64)
    }
}
