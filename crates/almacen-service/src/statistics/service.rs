//! System totals for dashboards.

use std::sync::Arc;

use serde::Serialize;

use almacen_auth::RbacEnforcer;
use almacen_auth::rbac::Permission;
use almacen_core::error::AppError;
use almacen_database::RepositorySet;

use crate::context::RequestContext;

/// Record counts, soft-deleted records included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// All accounts.
    pub total_users: u64,
    /// All categories.
    pub total_categories: u64,
}

/// Computes [`Statistics`].
#[derive(Debug, Clone)]
pub struct StatisticsService {
    repos: RepositorySet,
    rbac: Arc<RbacEnforcer>,
}

impl StatisticsService {
    /// Creates a new statistics service.
    pub fn new(repos: RepositorySet, rbac: Arc<RbacEnforcer>) -> Self {
        Self { repos, rbac }
    }

    /// Counts users and categories concurrently.
    pub async fn get_statistics(&self, ctx: &RequestContext) -> Result<Statistics, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::StatisticsRead)?;

        let (total_users, total_categories) = tokio::try_join!(
            self.repos.users.count(false),
            self.repos.categories.count(false),
        )?;

        Ok(Statistics {
            total_users,
            total_categories,
        })
    }
}
