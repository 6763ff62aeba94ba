//! In-memory user store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use almacen_core::error::AppError;
use almacen_core::result::AppResult;
use almacen_entity::user::model::{normalize_email, normalize_user_name};
use almacen_entity::user::{CreateUser, UpdateUser, User, UserFilter};

use crate::repositories::UserRepository;

/// User store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rejects `user_name`/`email` values already held by a record other than `except`.
fn check_unique(
    users: &HashMap<Uuid, User>,
    user_name: &str,
    email: &str,
    except: Option<Uuid>,
) -> AppResult<()> {
    for user in users.values() {
        if Some(user.id) == except {
            continue;
        }
        if user.user_name == user_name {
            return Err(AppError::conflict("Username already exists"));
        }
        if user.email == email {
            return Err(AppError::conflict("Email already in use"));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_login(
        &self,
        user_name: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let user_name = user_name.map(normalize_user_name);
        let email = email.map(normalize_email);
        let users = self.users.read().await;

        if let Some(ref user_name) = user_name {
            if let Some(user) = users.values().find(|u| &u.user_name == user_name) {
                return Ok(Some(user.clone()));
            }
        }
        Ok(email.and_then(|email| users.values().find(|u| u.email == email).cloned()))
    }

    async fn find_all(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let user_name = normalize_user_name(&data.user_name);
        let email = normalize_email(&data.email);

        let mut users = self.users.write().await;
        check_unique(&users, &user_name, &email, None)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            user_name,
            email,
            password_hash: data.password_hash.clone(),
            role: data.role,
            active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        let mut updated = users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        data.apply_to(&mut updated);
        check_unique(&users, &updated.user_name, &updated.email, Some(id))?;
        updated.updated_at = Utc::now();

        users.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn count(&self, only_active: bool) -> AppResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| !only_active || u.active).count() as u64)
    }
}
