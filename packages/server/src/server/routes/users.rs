use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};

use crate::common::{ApiError, ApiResponse};
use crate::domains::auth::models::UserProfile;
use crate::domains::users;
use crate::server::app::AppState;

/// GET /api/v1/users
pub async fn list_users_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, ApiError> {
    let all = users::list_users(&state.deps).await?;
    let message = format!("Found {} users", all.len());
    Ok(Json(ApiResponse::success(message, all)))
}

/// POST /api/v1/users
pub async fn save_user_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<UserProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), ApiError> {
    let Json(user) = body?;
    let saved = users::save_user(user, &state.deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User saved successfully", saved)),
    ))
}
