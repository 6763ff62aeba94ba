//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use almacen_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, RbacEnforcer};
use almacen_core::config::AppConfig;
use almacen_core::error::AppError;
use almacen_database::RepositorySet;
use almacen_service::{AuthService, CategoryService, StatisticsService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Persistence ──────────────────────────────────────────
    /// Repositories behind trait objects
    pub repos: RepositorySet,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub auth_service: Arc<AuthService>,
    /// Account management
    pub user_service: Arc<UserService>,
    /// Category management
    pub category_service: Arc<CategoryService>,
    /// System totals
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    /// Wires every service from configuration and a repository set.
    ///
    /// Fails if the auth section is unusable (empty secret, bad Argon2 parameters).
    pub fn build(config: AppConfig, repos: RepositorySet) -> Result<Self, AppError> {
        config.auth.validate(&config.environment)?;

        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(RbacEnforcer::new());

        let auth_service = Arc::new(AuthService::new(
            repos.users.clone(),
            hasher.clone(),
            validator.clone(),
            jwt_encoder,
        ));
        let user_service = Arc::new(UserService::new(
            repos.users.clone(),
            hasher,
            validator,
            rbac_enforcer.clone(),
        ));
        let category_service = Arc::new(CategoryService::new(
            repos.categories.clone(),
            rbac_enforcer.clone(),
        ));
        let statistics_service = Arc::new(StatisticsService::new(
            repos.clone(),
            rbac_enforcer.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            repos,
            jwt_decoder,
            rbac_enforcer,
            auth_service,
            user_service,
            category_service,
            statistics_service,
        })
    }
}
