//! Category handlers. Reads are public; writes go through the guard stages.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use almacen_entity::category::Category;

use crate::dto::request::{CategoryRequest, DeleteQuery, ListQuery, UpdateCategoryRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, CurrentAccount, IdPath, JsonBody, QueryParams};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state
        .category_service
        .list_categories(query.include_inactive)
        .await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state.category_service.get_category(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let category = state
        .category_service
        .create_category(auth.context(), req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Category created", category)),
    ))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<UpdateCategoryRequest>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state
        .category_service
        .update_category(auth.context(), id, req.into())
        .await?;
    Ok(Json(ApiResponse::with_message("Category updated", category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    account: CurrentAccount,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<DeleteQuery>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state
        .category_service
        .delete_category(&account.context, id, query.hard_delete)
        .await?;

    let message = if query.hard_delete {
        "Category permanently deleted"
    } else {
        "Category deactivated"
    };
    Ok(Json(ApiResponse::with_message(message, category)))
}
