//! Route definitions for the Almacen HTTP API.
//!
//! Every route is mounted under `/api`. Guarded methods run two stages
//! before the handler: authentication, then the role guard for the
//! method's [`Permission`].

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, delete, get, post, put};

use almacen_auth::Permission;

use crate::handlers;
use crate::middleware::auth::authenticate;
use crate::middleware::rbac::{RoleGuard, require_permission};
use crate::state::AppState;

/// Builds the router with all routes and binds `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes(&state))
        .merge(category_routes(&state))
        .merge(statistics_routes(&state))
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Wraps a method router in authentication followed by the guard for
/// `permission`. The layer added last runs first.
fn gated(
    state: &AppState,
    permission: Permission,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let guard = RoleGuard::new(state.rbac_enforcer.clone(), permission);
    route
        .route_layer(from_fn_with_state(guard, require_permission))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

/// Signup and signin
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/signin", post(handlers::auth::signin))
}

fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            gated(state, Permission::UserList, get(handlers::user::list_users)).merge(gated(
                state,
                Permission::UserCreate,
                post(handlers::user::create_user),
            )),
        )
        .route(
            "/users/{id}",
            gated(state, Permission::UserRead, get(handlers::user::get_user))
                .merge(gated(
                    state,
                    Permission::UserUpdate,
                    put(handlers::user::update_user),
                ))
                .merge(gated(
                    state,
                    Permission::UserDelete,
                    delete(handlers::user::delete_user),
                )),
        )
}

/// Reads are public
fn category_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).merge(gated(
                state,
                Permission::CategoryCreate,
                post(handlers::category::create_category),
            )),
        )
        .route(
            "/categories/{id}",
            get(handlers::category::get_category)
                .merge(gated(
                    state,
                    Permission::CategoryUpdate,
                    put(handlers::category::update_category),
                ))
                .merge(gated(
                    state,
                    Permission::CategoryDelete,
                    delete(handlers::category::delete_category),
                )),
        )
}

fn statistics_routes(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/statistics",
        gated(
            state,
            Permission::StatisticsRead,
            get(handlers::statistics::get_statistics),
        ),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
