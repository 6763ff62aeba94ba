//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A top-level grouping of products.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Unique, trimmed name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Soft-delete flag.
    pub active: bool,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    /// Trimmed name.
    pub name: String,
    /// Trimmed description.
    pub description: String,
}

/// Partial update of a category.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
}

impl UpdateCategory {
    /// Applies the non-`None` fields to `category`.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(ref name) = self.name {
            category.name = name.trim().to_string();
        }
        if let Some(ref description) = self.description {
            category.description = description.trim().to_string();
        }
        if let Some(active) = self.active {
            category.active = active;
        }
    }
}
