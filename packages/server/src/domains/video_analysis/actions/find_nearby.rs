//! Nearby query - geofence the stored analyses around a point

use tracing::{debug, info, instrument};

use super::decode_documents;
use crate::common::utils::{filter_within_radius, Coordinates};
use crate::domains::video_analysis::models::VideoAnalysis;
use crate::kernel::{ServerDeps, StoreError};

/// Analyses captured within `radius_km` of `origin`, in storage order.
///
/// Fetches the whole collection and filters in process. Never returns `None`;
/// no match is an empty vector.
#[instrument(skip(deps))]
pub async fn find_nearby(
    origin: Coordinates,
    radius_km: f64,
    deps: &ServerDeps,
) -> Result<Vec<VideoAnalysis>, StoreError> {
    let documents = deps
        .store_call(deps.monitoring.list_video_analyses())
        .await?;
    debug!(total = documents.len(), "Fetched video analyses");

    let nearby = filter_within_radius(decode_documents(documents), origin, radius_km);

    info!(count = nearby.len(), radius_km, "Nearby video analyses found");
    Ok(nearby)
}
