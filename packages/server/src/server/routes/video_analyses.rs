use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use crate::common::utils::{Coordinates, DEFAULT_NEARBY_RADIUS_KM};
use crate::common::{ApiError, ApiResponse};
use crate::domains::video_analysis::{self, VideoAnalysis};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
}

/// GET /api/v1/video-analyses
pub async fn list_video_analyses_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<VideoAnalysis>>, ApiError> {
    Ok(Json(
        video_analysis::list_video_analyses(&state.deps).await?,
    ))
}

/// GET /api/v1/video-analyses/:video_id
pub async fn get_video_analysis_handler(
    Extension(state): Extension<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<VideoAnalysis>, ApiError> {
    video_analysis::get_video_analysis(&video_id, &state.deps)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Video analysis {}", video_id)))
}

/// GET /api/v1/nearby?latitude=&longitude=[&radius_km=]
pub async fn nearby_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<VideoAnalysis>>>, ApiError> {
    let Query(query) = query?;

    let origin = Coordinates::validated(query.latitude, query.longitude)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let radius_km = query.radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(ApiError::Validation(
            "radius_km must be a positive number".to_string(),
        ));
    }

    let nearby = video_analysis::find_nearby(origin, radius_km, &state.deps).await?;
    let message = format!(
        "Found {} video analyses within {:.1} km",
        nearby.len(),
        radius_km
    );

    Ok(Json(ApiResponse::success(message, nearby)))
}
