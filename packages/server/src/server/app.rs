//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::{rate_limit_auth, require_admin, require_auth};
use crate::server::routes::{
    get_video_analysis_handler, health_handler, list_locations_handler, list_users_handler,
    list_video_analyses_handler, location_cameras_handler, me_handler, nearby_handler,
    save_user_handler, send_otp_handler, verify_otp_handler,
};

/// Upper bound on a whole request, on top of the per-call external timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        // No origins configured - allow any origin (development)
        return cors.allow_origin(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// Public: /health, /api/v1/auth/send-otp, /api/v1/auth/verify-otp.
/// Everything else under /api/v1 requires a bearer token; /users also
/// requires an admin phone number.
pub fn build_app(
    deps: Arc<ServerDeps>,
    allowed_origins: &[String],
    rate_limit_enabled: bool,
) -> Router {
    let app_state = AppState { deps };

    let mut auth_routes = Router::new()
        .route("/auth/send-otp", post(send_otp_handler))
        .route("/auth/verify-otp", post(verify_otp_handler));

    if rate_limit_enabled {
        auth_routes = rate_limit_auth(auth_routes);
    }

    let protected_routes = Router::new()
        .route("/auth/me", get(me_handler))
        .route("/locations", get(list_locations_handler))
        .route(
            "/locations/:location_id/cameras",
            get(location_cameras_handler),
        )
        .route("/video-analyses", get(list_video_analyses_handler))
        .route("/video-analyses/:video_id", get(get_video_analysis_handler))
        .route("/nearby", get(nearby_handler))
        .route_layer(middleware::from_fn(require_auth));

    // Credential records are managed by admins only
    let admin_routes = Router::new()
        .route("/users", get(list_users_handler).post(save_user_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        // Health check (no auth, no rate limit)
        .route("/health", get(health_handler))
        .nest(
            "/api/v1",
            auth_routes.merge(protected_routes).merge(admin_routes),
        )
        .layer(Extension(app_state)) // Shared state (must wrap the middlewares that need it)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
