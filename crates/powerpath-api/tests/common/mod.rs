//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use powerpath_core::clock::Clock;
use powerpath_core::collaborator::Collaborator;
use powerpath_test_support::FixedClock;
use tower::ServiceExt;

use powerpath_api::routes;
use powerpath_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 3, 1, 9, 0, 0).unwrap(),
    ))
}

/// Build the app router over the built-in guide with no collaborator
/// and a zero typing delay. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with(None, Duration::ZERO)
}

/// Build the app router with a custom collaborator and typing delay.
pub fn build_test_app_with(
    collaborator: Option<Arc<dyn Collaborator>>,
    typing_delay: Duration,
) -> Router {
    let graph = Arc::new(powerpath_content::builtin_guide().expect("built-in guide compiles"));
    let app_state = AppState::new(graph, fixed_clock(), collaborator, typing_delay);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/sessions", routes::session::router())
        .with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
