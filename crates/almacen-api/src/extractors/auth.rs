//! Identity extractors.
//!
//! [`AuthUser`] is the claims-only strength: it trusts the verified token.
//! [`CurrentAccount`] builds on it and re-reads the account so that a
//! deleted or deactivated account is rejected and the current role is used.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use almacen_core::error::AppError;
use almacen_entity::user::User;
use almacen_service::RequestContext;

use crate::error::ApiError;
use crate::middleware::auth::extract_token;
use crate::state::AppState;

/// Authenticated identity taken from the token claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by the authentication stage on guarded routes.
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        let token = extract_token(&parts.headers)?;
        let claims = state.jwt_decoder.verify(token)?;
        Ok(AuthUser(RequestContext::from(claims)))
    }
}

/// Authenticated identity backed by the stored account.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    /// Context rebuilt from the stored account, not the token.
    pub context: RequestContext,
    /// The stored account.
    pub user: User,
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims_ctx) = AuthUser::from_request_parts(parts, state).await?;

        let user = state
            .repos
            .users
            .find_by_id(claims_ctx.user_id)
            .await?
            .filter(|u| u.active)
            .ok_or_else(|| AppError::unauthorized("Account no longer exists or is deactivated"))?;

        let context = RequestContext {
            role: user.role,
            email: user.email.clone(),
            ..claims_ctx
        };
        Ok(Self { context, user })
    }
}

/// Admission check for `POST /api/auth/signup`.
///
/// Runs before the body is read. With `auth.signup_requires_admin` off it
/// admits everyone. With it on, the caller must be a stored, active admin.
#[derive(Debug, Clone)]
pub struct SignupGate(pub Option<CurrentAccount>);

impl FromRequestParts<AppState> for SignupGate {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.auth.signup_requires_admin {
            return Ok(Self(None));
        }

        let account = CurrentAccount::from_request_parts(parts, state).await?;
        if !account.context.role.is_admin() {
            return Err(AppError::forbidden("Only administrators can register accounts").into());
        }
        Ok(Self(Some(account)))
    }
}
