use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::ApiError;
use crate::domains::locations::actions;
use crate::domains::locations::models::{Camera, LocationOverview};
use crate::server::app::AppState;

/// GET /api/v1/locations
pub async fn list_locations_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<LocationOverview>>, ApiError> {
    Ok(Json(actions::list_locations(&state.deps).await?))
}

/// GET /api/v1/locations/:location_id/cameras
pub async fn location_cameras_handler(
    Extension(state): Extension<AppState>,
    Path(location_id): Path<String>,
) -> Result<Json<Vec<Camera>>, ApiError> {
    Ok(Json(
        actions::cameras_for_location(&location_id, &state.deps).await?,
    ))
}
