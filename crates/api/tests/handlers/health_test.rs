use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotsync_api::{build_app, config::ApiConfig, with_layers};
use tracing::Level;

use crate::test_utils::TestContext;

fn config_with_prefix(path_prefix: Option<&str>) -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        path_prefix: path_prefix.map(str::to_string),
        database_url: "postgres://localhost/unused".to_string(),
        database_max_connections: 1,
        database_acquire_timeout: 1,
        log_level: Level::INFO,
        frontend_origin: "http://localhost:5173".to_string(),
        request_timeout: 5,
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let server = TestContext::new().server();

    let response = server.get("/version").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], json!("slotsync-api"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[test_log::test(tokio::test)]
async fn test_routes_are_nested_under_prefix() {
    let state = TestContext::new().build_state();
    let app = build_app(&config_with_prefix(Some("/api")), state).unwrap();
    let server = TestServer::new(app).unwrap();

    server.get("/api/health").await.assert_status_ok();
    server
        .get("/health")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let state = TestContext::new().build_state();
    let app = build_app(&config_with_prefix(None), state).unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .get("/health")
        .add_header(
            axum::http::header::ORIGIN,
            axum::http::HeaderValue::from_static("http://localhost:5173"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:5173"
    );
}

#[test]
fn test_invalid_frontend_origin_is_rejected() {
    let mut config = config_with_prefix(None);
    config.frontend_origin = "http://bad\norigin".to_string();

    let state = TestContext::new().build_state();
    assert!(build_app(&config, state).is_err());
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let mut config = config_with_prefix(None);
    config.request_timeout = 1;
    let slow = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "done"
        }),
    );
    let server = TestServer::new(with_layers(slow, &config).unwrap()).unwrap();

    let response = server.get("/slow").await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
}
