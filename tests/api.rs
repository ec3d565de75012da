use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use egg_timer::{controller::Labels, create_router, AppState, ManualTickSource};

fn app() -> (Router, ManualTickSource) {
    let source = ManualTickSource::new();
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        Labels::english(),
        Arc::new(source.clone()),
    ));
    (create_router(state), source)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_before_select_is_a_conflict() {
    let (app, source) = app();
    let (status, _) = send(&app, "POST", "/start").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(source.run_count(), 0);
}

#[tokio::test]
async fn unknown_option_is_a_bad_request() {
    let (app, _) = app();
    let (status, _) = send(&app, "POST", "/select/7").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn select_start_and_watch_status() {
    let (app, source) = app();

    let (status, body) = send(&app, "POST", "/select/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["display_text"], "02:00");
    assert_eq!(body["view"]["control_label"], "start timer");
    assert_eq!(body["view"]["control_enabled"], true);

    let (status, body) = send(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["control_label"], "timer running");
    assert_eq!(body["view"]["control_enabled"], false);

    source.advance(Duration::from_secs(1));
    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["run_state"], "running");
    assert_eq!(body["selected_option"], "option2");
    assert_eq!(body["remaining_ms"], 119_000);
    assert_eq!(body["view"]["display_text"], "01:59");
    assert_eq!(body["last_action"], "start");

    source.advance(Duration::from_secs(119));
    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["run_state"], "idle");
    assert_eq!(body["view"]["finished_count"], 1);
    assert_eq!(body["view"]["control_label"], "choose type");
}
