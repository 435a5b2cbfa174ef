use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_SENTENCE: &str = "No sentence provided.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", MISSING_SENTENCE)]
    MissingSentence,

    #[error("NLP pipeline failed: {0}")]
    Pipeline(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingSentence => StatusCode::BAD_REQUEST,
            AppError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sentence_message_and_status() {
        let err = AppError::MissingSentence;
        assert_eq!(err.to_string(), "No sentence provided.");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn pipeline_errors_are_server_faults() {
        let err = AppError::from(anyhow::anyhow!("service down"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("service down"));
    }
}
