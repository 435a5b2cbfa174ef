mod builtin;
mod factory;
mod remote;
pub mod lexicon;

pub use builtin::BuiltinPipeline;
pub use factory::PipelineFactory;
pub use remote::RemotePipeline;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A token as produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Universal POS tag, e.g. `NOUN`.
    pub pos: String,
    /// Dependency relation to the head, e.g. `nsubj`.
    pub dep: String,
    /// Index of the governing token; equal to the token's own index for the root.
    pub head: usize,
    /// Whether the token is followed by whitespace in the source text.
    #[serde(default = "default_whitespace")]
    pub whitespace: bool,
}

fn default_whitespace() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSentence {
    pub tokens: Vec<Token>,
    /// Tree markup rendered by the pipeline itself, if it provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

impl ParsedSentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, markup: None }
    }

    pub fn is_root(&self, index: usize) -> bool {
        self.tokens.get(index).map(|t| t.head == index).unwrap_or(false)
    }
}

/// Tokenizer, tagger and dependency parser behind one call.
#[async_trait]
pub trait NlpPipeline: Send + Sync {
    /// Short identifier reported by the health endpoint
    fn name(&self) -> &str;

    /// Tokenize, tag and parse a sentence
    async fn parse(&self, sentence: &str) -> Result<ParsedSentence, anyhow::Error>;

    async fn health_check(&self) -> Result<bool, anyhow::Error> {
        Ok(true)
    }
}
