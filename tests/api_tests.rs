//! Router-level tests for the page, `/generate`, static assets and health.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sintaxis_backend::config::{CachePolicy, Config};
use sintaxis_backend::nlp::BuiltinPipeline;
use sintaxis_backend::{create_routes, AppState};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: config pointing at a temp static dir with one stylesheet
fn test_config(dir: &TempDir) -> Config {
    std::fs::write(dir.path().join("style.css"), "body { color: black; }").unwrap();

    let mut config = Config::default();
    config.server.static_dir = dir.path().to_str().unwrap().to_string();
    config.server.template_path = dir.path().join("missing.html").to_str().unwrap().to_string();
    config
}

fn setup_app(config: Config) -> Router {
    let state = AppState::with_pipeline(config, Arc::new(BuiltinPipeline::new()));
    create_routes(state).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn header_value<'a>(response: &'a axum::response::Response, name: header::HeaderName) -> &'a str {
    response.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn generate_returns_breakdown_and_tree() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(test_config(&dir));

    let response = app
        .oneshot(post_json("/generate", r#"{"sentence": "El gato duerme."}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/json; charset=utf-8");
    assert_eq!(header_value(&response, header::CACHE_CONTROL), "max-age=180, must-revalidate");
    assert_eq!(header_value(&response, header::X_CONTENT_TYPE_OPTIONS), "nosniff");

    let body = extract_json(response.into_body()).await;
    let breakdown = body["breakdown"].as_str().unwrap();
    let lines: Vec<&str> = breakdown.lines().collect();
    assert_eq!(
        lines,
        vec![
            "(Determinante: El)",
            "(Sustantivo: gato)",
            "(Verbo: duerme)",
            "(Signo de puntuación: .)"
        ]
    );

    let tree = body["tree"].as_str().unwrap();
    assert!(tree.starts_with("<svg"));
    assert!(tree.contains(">sujeto nominal</textPath>"));
    assert!(!tree.contains(">nsubj<"));
    assert!(!tree.contains(">DET<"));
}

#[tokio::test]
async fn empty_sentence_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(test_config(&dir));

    let response = app.oneshot(post_json("/generate", r#"{"sentence": ""}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"error": "No sentence provided."}));
}

#[tokio::test]
async fn missing_or_malformed_sentence_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(test_config(&dir));

    for body in ["{}", r#"{"sentence": null}"#, r#"{"sentence": 42}"#, "not json", ""] {
        let response = app.clone().oneshot(post_json("/generate", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {:?}", body);
        let json = extract_json(response.into_body()).await;
        assert_eq!(json["error"], "No sentence provided.");
    }
}

#[tokio::test]
async fn index_page_hosts_the_form() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.cache.asset_version = Some("42".to_string());
    let app = setup_app(config);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/html"));
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("id=\"sentence\""));
    assert!(html.contains("/static/style.css?v=42"));
}

#[tokio::test]
async fn serves_stylesheets_as_css() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(test_config(&dir));

    let response = app.oneshot(get("/static/style.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/css"));
    assert_eq!(header_value(&response, header::X_CONTENT_TYPE_OPTIONS), "nosniff");
    assert_eq!(extract_text(response.into_body()).await, "body { color: black; }");
}

#[tokio::test]
async fn unknown_static_path_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(test_config(&dir));

    let response = app.oneshot(get("/static/nope.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cache_policy_is_configurable() {
    let dir = TempDir::new().unwrap();

    let mut config = test_config(&dir);
    config.cache.policy = CachePolicy::NoStore;
    let response = setup_app(config).oneshot(get("/static/style.css")).await.unwrap();
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        "no-store, no-cache, must-revalidate"
    );

    let mut config = test_config(&dir);
    config.cache.policy = CachePolicy::Immutable;
    config.cache.max_age_secs = 31536000;
    let response = setup_app(config).oneshot(get("/static/style.css")).await.unwrap();
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        "public, max-age=31536000, immutable"
    );
}

#[tokio::test]
async fn health_reports_pipeline() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(test_config(&dir));

    let response = app.oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["pipeline"], "builtin");
    assert_eq!(body["pipeline_healthy"], true);
}
