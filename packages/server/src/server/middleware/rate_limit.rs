// Rate limiting for the OTP endpoints using tower-governor
//
// Configuration:
// - One request replenished every 2 seconds per client IP, burst of 5
// - Applies to /auth/send-otp and /auth/verify-otp so codes cannot be
//   brute-forced or SMS sends spammed
//
// Client IP comes from X-Forwarded-For / X-Real-IP / Forwarded, falling back
// to the peer address, so the layer also works behind a proxy.
use std::sync::Arc;

use axum::Router;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing::warn;

pub const AUTH_REPLENISH_INTERVAL_SECS: u64 = 2;
pub const AUTH_BURST_SIZE: u32 = 5;

/// Wrap the auth routes in a per-IP limiter.
pub fn rate_limit_auth<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let Some(config) = GovernorConfigBuilder::default()
        .per_second(AUTH_REPLENISH_INTERVAL_SECS)
        .burst_size(AUTH_BURST_SIZE)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
    else {
        warn!("Invalid rate limiter configuration, auth routes are not rate limited");
        return router;
    };

    router.layer(GovernorLayer {
        config: Arc::new(config),
    })
}
