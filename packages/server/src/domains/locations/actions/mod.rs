//! Locations domain actions - read-only queries over the monitoring store

use tracing::debug;

use super::models::{Camera, LocationOverview};
use crate::kernel::{ServerDeps, StoreError};

/// All locations with their cameras inlined.
pub async fn list_locations(deps: &ServerDeps) -> Result<Vec<LocationOverview>, StoreError> {
    let locations = deps.store_call(deps.monitoring.list_locations()).await?;

    let mut overviews = Vec::with_capacity(locations.len());
    for location in locations {
        let cameras = deps
            .store_call(deps.monitoring.cameras_for_location(&location.id))
            .await?;
        overviews.push(LocationOverview::new(location, cameras));
    }

    debug!(count = overviews.len(), "Listed locations");
    Ok(overviews)
}

pub async fn cameras_for_location(
    location_id: &str,
    deps: &ServerDeps,
) -> Result<Vec<Camera>, StoreError> {
    deps.store_call(deps.monitoring.cameras_for_location(location_id))
        .await
}
