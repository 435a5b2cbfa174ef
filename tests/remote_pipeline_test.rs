use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use sintaxis_backend::config::{Config, NlpBackend};
use sintaxis_backend::{create_routes, AppState};
use tower::util::ServiceExt;

fn remote_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.nlp.backend = NlpBackend::Remote;
    config.nlp.service_url = server.base_url();
    config
}

async fn generate(config: Config, sentence: &str) -> (StatusCode, Value) {
    let app = create_routes(AppState::new(config).unwrap()).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "sentence": sentence }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn renders_tree_from_remote_tokens() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/parse").json_body_partial(r#"{"text": "Ana lee libros."}"#);
        then.status(200).json_body(json!({
            "tokens": [
                {"text": "Ana", "pos": "PROPN", "dep": "nsubj", "head": 1},
                {"text": "lee", "pos": "VERB", "dep": "ROOT", "head": 1},
                {"text": "libros", "pos": "NOUN", "dep": "obj", "head": 1, "whitespace": false},
                {"text": ".", "pos": "PUNCT", "dep": "punct", "head": 1, "whitespace": false}
            ]
        }));
    });

    let (status, body) = generate(remote_config(&server), "Ana lee libros.").await;
    mock.assert();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["breakdown"],
        "(Nombre propio: Ana)\n(Verbo: lee)\n(Sustantivo: libros)\n(Signo de puntuación: .)"
    );
    let tree = body["tree"].as_str().unwrap();
    assert!(tree.contains(">objeto</textPath>"));
    assert!(tree.contains(">libros.</tspan>"));
}

#[tokio::test]
async fn localizes_remote_markup() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(200).json_body(json!({
            "tokens": [
                {"text": "Llueve", "pos": "VERB", "dep": "ROOT", "head": 0}
            ],
            "svg": "<svg><text><tspan class=\"displacy-word\">Llueve</tspan><tspan class=\"displacy-tag\">VERB</tspan></text></svg>"
        }));
    });

    let (status, body) = generate(remote_config(&server), "Llueve").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tree"],
        "<svg><text><tspan class=\"displacy-word\">Llueve</tspan><tspan class=\"displacy-tag\">Verbo</tspan></text></svg>"
    );
}

#[tokio::test]
async fn remote_failure_is_a_server_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(500);
    });

    let (status, body) = generate(remote_config(&server), "El gato duerme.").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("NLP pipeline failed"));
}
