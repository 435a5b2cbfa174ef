use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{NlpPipeline, ParsedSentence, Token};

/// Client for a parsing sidecar that wraps a statistical NLP model.
#[derive(Debug, Clone)]
pub struct RemotePipeline {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    tokens: Vec<Token>,
    #[serde(default)]
    svg: Option<String>,
}

impl RemotePipeline {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for NLP service")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl NlpPipeline for RemotePipeline {
    fn name(&self) -> &str {
        "remote"
    }

    async fn parse(&self, sentence: &str) -> Result<ParsedSentence, anyhow::Error> {
        let url = format!("{}/parse", self.base_url);
        debug!("Sending parse request to {} (model={})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&ParseRequest { text: sentence, model: &self.model })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("NLP service returned {}: {}", status, body);
            anyhow::bail!("NLP service returned {}", status);
        }

        let result: ParseResponse = response.json().await?;
        let count = result.tokens.len();
        if let Some(bad) = result.tokens.iter().position(|t| t.head >= count) {
            anyhow::bail!("NLP service returned token {} with head outside the sentence", bad);
        }

        Ok(ParsedSentence {
            tokens: result.tokens,
            markup: result.svg,
        })
    }

    async fn health_check(&self) -> Result<bool, anyhow::Error> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}
