use axum::{extract::Extension, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    time: DateTime<Utc>,
    store: String,
}

/// Health check endpoint
///
/// Returns 200 OK when the store answers a ping, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let deps = &state.deps;
    let store_ok = match deps.store_call(deps.monitoring.ping()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Health check: store ping failed");
            false
        }
    };

    let (status_code, status, store) = if store_ok {
        (StatusCode::OK, "OK", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DEGRADED", "error")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            time: Utc::now(),
            store: store.to_string(),
        }),
    )
}
