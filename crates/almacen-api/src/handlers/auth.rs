//! Auth handlers: signup and signin.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{SigninRequest, SignupRequest};
use crate::dto::response::AuthResponse;
use crate::error::ApiResult;
use crate::extractors::{JsonBody, SignupGate, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/signup
///
/// Open by default. With `auth.signup_requires_admin` only an admin account
/// may register new accounts, and that is checked before the body is read.
pub async fn signup(
    State(state): State<AppState>,
    _gate: SignupGate,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let outcome = state.auth_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".to_string(),
            token: outcome.token,
            user: outcome.user.into(),
        }),
    ))
}

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SigninRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let outcome = state.auth_service.login(req.into()).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Signed in successfully".to_string(),
        token: outcome.token,
        user: outcome.user.into(),
    }))
}
