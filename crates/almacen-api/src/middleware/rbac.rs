//! Role guard stage for per-route allow-lists.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use almacen_auth::{Permission, RbacEnforcer};
use almacen_service::RequestContext;

use crate::error::ApiResult;

/// State for one guarded route: which permission it needs.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    enforcer: Arc<RbacEnforcer>,
    permission: Permission,
}

impl RoleGuard {
    /// Creates a guard for `permission`.
    pub fn new(enforcer: Arc<RbacEnforcer>, permission: Permission) -> Self {
        Self {
            enforcer,
            permission,
        }
    }
}

/// Must run after the authentication stage. A request that reaches this
/// stage without a context is unauthenticated (401); one whose role is
/// outside the allow-list is forbidden (403).
pub async fn require_permission(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let role = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.role);
    guard.enforcer.authorize(role, guard.permission)?;
    Ok(next.run(request).await)
}
