use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    sentence: Option<String>,
}

/// Build the application router with the configured cache headers applied to every response.
pub fn create_routes(state: AppState) -> anyhow::Result<Router> {
    let cache_control = HeaderValue::from_str(&state.config.cache.cache_control())?;
    let static_dir = state.config.server.static_dir.clone();

    let router = Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/api/health", get(health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, cache_control))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.html().to_string())
}

async fn generate(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Anything that is not an object with a string "sentence" counts as no sentence
    let sentence = serde_json::from_slice::<GenerateRequest>(&body)
        .ok()
        .and_then(|request| request.sentence)
        .unwrap_or_default();

    match state.analyzer.analyze(&sentence).await {
        Ok(analysis) => {
            info!("Analyzed sentence ({} chars)", sentence.chars().count());
            Ok((
                [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                Json(analysis),
            )
                .into_response())
        }
        Err(e @ AppError::MissingSentence) => {
            warn!("Rejected /generate request: {}", e);
            Err(e)
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            Err(e)
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let pipeline = state.analyzer.pipeline();
    let healthy = pipeline.health_check().await.unwrap_or(false);
    Json(json!({
        "status": "ok",
        "pipeline": pipeline.name(),
        "pipeline_healthy": healthy
    }))
}
