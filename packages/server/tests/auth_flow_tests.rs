//! Integration tests for the OTP login flow over HTTP.
//!
//! Covers:
//! - send-otp / verify-otp happy path
//! - wrong code vs unknown identity (same response)
//! - provider outage and slow provider
//! - request validation
//! - rate limiting on the auth routes

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{officer, TestApp};
use crowd_monitor_core::common::error::INVALID_CREDENTIALS_MESSAGE;
use crowd_monitor_core::kernel::TestDependencies;
use serde_json::json;

const PHONE: &str = "+910000000000";
const CODE: &str = "123456";

fn app_with_officer() -> TestApp {
    let app = TestApp::new();
    app.deps.otp.set_code(PHONE, CODE);
    app.deps.credentials.insert(officer(PHONE));
    app
}

#[tokio::test]
async fn test_send_otp_dispatches_code() {
    let app = TestApp::new();

    let res = app
        .post_json("/api/v1/auth/send-otp", json!({"phone_number": PHONE}), None)
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["message"], "OTP sent successfully");
    assert_eq!(app.deps.otp.sent_to(), vec![PHONE.to_string()]);
}

#[tokio::test]
async fn test_send_otp_accepts_identity_alias() {
    let app = TestApp::new();

    let res = app
        .post_json("/api/v1/auth/send-otp", json!({"identity": PHONE}), None)
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.deps.otp.sent_to(), vec![PHONE.to_string()]);
}

#[tokio::test]
async fn test_send_otp_rejects_malformed_body() {
    let app = TestApp::new();

    let res = app
        .post_json("/api/v1/auth/send-otp", json!({"phone": PHONE}), None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["success"], false);

    let res = app
        .post_json("/api/v1/auth/send-otp", json!({"phone_number": "  "}), None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(app.deps.otp.sent_to().is_empty());
}

#[tokio::test]
async fn test_send_otp_provider_outage_is_bad_gateway() {
    let app = TestApp::new();
    app.deps.otp.set_unavailable(true);

    let res = app
        .post_json("/api/v1/auth/send-otp", json!({"phone_number": PHONE}), None)
        .await;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.body["success"], false);
}

#[tokio::test]
async fn test_login_issues_token_for_phone_number() {
    let app = app_with_officer();

    let res = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": PHONE, "otp_code": CODE}),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["profile"]["phone_number"], PHONE);
    assert_eq!(res.body["profile"]["name"], "Rajesh Kumar");

    let token = res.body["token"].as_str().expect("token is a string");
    let claims = app.deps.jwt_service.verify_token(token).unwrap();
    assert_eq!(claims.phone_number, PHONE);

    // The issued token opens protected routes
    let me = app.get("/api/v1/auth/me", Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["phone_number"], PHONE);
}

#[tokio::test]
async fn test_login_accepts_identity_and_code_aliases() {
    let app = app_with_officer();

    let res = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"identity": PHONE, "code": CODE}),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["token"].is_string());
}

#[tokio::test]
async fn test_wrong_code_and_unknown_identity_look_the_same() {
    let app = app_with_officer();
    app.deps.otp.set_code("+910000000001", CODE);

    let wrong_code = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": PHONE, "otp_code": "000000"}),
            None,
        )
        .await;

    let unknown = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": "+910000000001", "otp_code": CODE}),
            None,
        )
        .await;

    assert_eq!(wrong_code.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_code.body, unknown.body);
    assert_eq!(wrong_code.body["error"], INVALID_CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn test_provider_outage_during_check_is_bad_gateway() {
    let app = app_with_officer();
    app.deps.otp.set_unavailable(true);

    let res = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": PHONE, "otp_code": CODE}),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(app.deps.credentials.lookup_count(), 0);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let deps = TestDependencies::new().with_timeout(Duration::from_millis(50));
    deps.otp.set_code(PHONE, CODE);
    deps.otp.set_delay(Duration::from_secs(2));
    deps.credentials.insert(officer(PHONE));
    let app = TestApp::from_deps(deps, false);

    let res = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": PHONE, "otp_code": CODE}),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_credential_store_failure_is_internal_error() {
    let app = TestApp::new();
    app.deps.otp.set_code(PHONE, CODE);
    app.deps.credentials.fail_with("connection refused on 10.1.2.3");

    let res = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": PHONE, "otp_code": CODE}),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Internal server error");
}

#[tokio::test]
async fn test_verify_otp_requires_code() {
    let app = app_with_officer();

    let res = app
        .post_json(
            "/api/v1/auth/verify-otp",
            json!({"phone_number": PHONE}),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(app.deps.otp.checks().is_empty());
}

#[tokio::test]
async fn test_auth_routes_are_rate_limited_per_ip() {
    let app = TestApp::with_rate_limit();

    let mut statuses = Vec::new();
    for _ in 0..6 {
        let res = app
            .post_json("/api/v1/auth/send-otp", json!({"phone_number": PHONE}), None)
            .await;
        statuses.push(res.status);
    }

    assert!(statuses[..5].iter().all(|s| *s == StatusCode::OK));
    assert_eq!(statuses[5], StatusCode::TOO_MANY_REQUESTS);
}
