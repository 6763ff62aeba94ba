//! Authentication stage.
//!
//! Verifies the session token and attaches a [`RequestContext`] to the
//! request's extensions. The context lives only as long as the request.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use almacen_auth::TokenError;
use almacen_service::RequestContext;

use crate::error::ApiResult;
use crate::state::AppState;

/// Alternate header carrying a bare token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Locates the token: `Authorization: Bearer <token>` first, then `x-access-token`.
///
/// A Bearer header always wins, so an empty one is `Missing` even when
/// `x-access-token` is also sent.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        let token = token.trim();
        return if token.is_empty() {
            Err(TokenError::Missing)
        } else {
            Ok(token)
        };
    }

    headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(TokenError::Missing)
}

/// Rejects the request with 403 when no token is present and 401 when the
/// token does not verify; otherwise continues with the identity attached.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = extract_token(request.headers())?;
    let claims = state.jwt_decoder.verify(token)?;

    request
        .extensions_mut()
        .insert(RequestContext::from(claims));
    Ok(next.run(request).await)
}
