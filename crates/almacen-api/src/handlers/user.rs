//! Account management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::dto::request::{DeleteQuery, ListQuery, SignupRequest, update_user_input};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, CurrentAccount, IdPath, JsonBody, QueryParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state
        .user_service
        .list_users(auth.context(), query.include_inactive)
        .await?;

    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    account: CurrentAccount,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .user_service
        .create_user(&account.context, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User created", user.into())),
    ))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    account: CurrentAccount,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let input = update_user_input(body)?;
    let user = state
        .user_service
        .update_user(&account.context, id, input)
        .await?;

    Ok(Json(ApiResponse::with_message("User updated", user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    account: CurrentAccount,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<DeleteQuery>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .delete_user(&account.context, id, query.hard_delete)
        .await?;

    let message = if query.hard_delete {
        "User permanently deleted"
    } else {
        "User deactivated"
    };
    Ok(Json(ApiResponse::with_message(message, user.into())))
}
