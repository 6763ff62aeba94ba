//! Statistics handler.

use axum::Json;
use axum::extract::State;

use almacen_service::statistics::Statistics;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Statistics>>> {
    let stats = state
        .statistics_service
        .get_statistics(auth.context())
        .await?;
    Ok(Json(ApiResponse::ok(stats)))
}
