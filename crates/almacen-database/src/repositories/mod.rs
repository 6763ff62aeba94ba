//! Repository traits and their PostgreSQL implementations.
//!
//! Services only ever see the traits. The concrete store is chosen once at
//! startup and handed around as a [`RepositorySet`].

pub mod category;
pub mod user;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use almacen_core::result::AppResult;
use almacen_entity::category::{Category, CreateCategory, UpdateCategory};
use almacen_entity::user::{CreateUser, UpdateUser, User, UserFilter};

use crate::memory::{MemoryCategoryRepository, MemoryUserRepository};

pub use category::PgCategoryRepository;
pub use user::PgUserRepository;

/// Storage for user accounts.
///
/// Implementations enforce uniqueness of `user_name` and `email` themselves
/// and report violations as `ErrorKind::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Find a user by primary key, active or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user matching the given username or email.
    ///
    /// The username is compared trimmed, the email trimmed and lowercased.
    /// Returns `None` when both are absent.
    async fn find_by_login(
        &self,
        user_name: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<User>>;

    /// List users matching the filter, newest first.
    async fn find_all(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Insert a new user.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User>;

    /// Permanently remove a user. Returns `false` if nothing was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Count users, optionally only active ones.
    async fn count(&self, only_active: bool) -> AppResult<u64>;
}

/// Storage for product categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + std::fmt::Debug {
    /// Find a category by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// List categories, newest first.
    async fn find_all(&self, include_inactive: bool) -> AppResult<Vec<Category>>;

    /// Insert a new category.
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Apply a partial update. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category>;

    /// Permanently remove a category.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Count categories, optionally only active ones.
    async fn count(&self, only_active: bool) -> AppResult<u64>;
}

/// The repositories a running application needs, behind trait objects.
#[derive(Debug, Clone)]
pub struct RepositorySet {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Categories.
    pub categories: Arc<dyn CategoryRepository>,
}

impl RepositorySet {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool)),
        }
    }

    /// Repositories backed by process memory. Contents are lost on exit.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            categories: Arc::new(MemoryCategoryRepository::new()),
        }
    }
}
