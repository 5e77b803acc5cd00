//! In-process HTTP client for the router.
//!
//! Requests go straight through `tower::ServiceExt::oneshot`; no socket is
//! opened and every collaborator is an in-memory double.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use crowd_monitor_core::kernel::TestDependencies;
use crowd_monitor_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    pub deps: TestDependencies,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::from_deps(TestDependencies::new(), false)
    }

    pub fn with_rate_limit() -> Self {
        Self::from_deps(TestDependencies::new(), true)
    }

    pub fn from_deps(deps: TestDependencies, rate_limit_enabled: bool) -> Self {
        let router = build_app(Arc::new(deps.server_deps()), &[], rate_limit_enabled);
        Self { deps, router }
    }

    /// A valid session token for the phone number
    pub fn token_for(&self, phone_number: &str) -> String {
        self.deps
            .jwt_service
            .create_token(phone_number)
            .expect("token issues")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", "203.0.113.7");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
