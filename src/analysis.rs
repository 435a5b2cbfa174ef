use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::AppError;
use crate::nlp::NlpPipeline;
use crate::render::{DepTree, DependencyRenderer, RenderOptions};
use crate::translate;

/// Result returned by `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub breakdown: String,
    pub tree: String,
}

/// Runs a sentence through the pipeline and localizes both outputs.
pub struct Analyzer {
    pipeline: Arc<dyn NlpPipeline>,
    renderer: DependencyRenderer,
    collapse_punct: bool,
}

impl Analyzer {
    pub fn new(pipeline: Arc<dyn NlpPipeline>, options: RenderOptions, collapse_punct: bool) -> Self {
        Self {
            pipeline,
            renderer: DependencyRenderer::new(options),
            collapse_punct,
        }
    }

    pub fn pipeline(&self) -> &Arc<dyn NlpPipeline> {
        &self.pipeline
    }

    pub async fn analyze(&self, sentence: &str) -> Result<Analysis, AppError> {
        if sentence.is_empty() {
            return Err(AppError::MissingSentence);
        }

        let parsed = self.pipeline.parse(sentence).await?;
        debug!("Parsed {} tokens with {}", parsed.tokens.len(), self.pipeline.name());

        let breakdown = translate::breakdown(&parsed);
        let tree = match parsed.markup.as_deref() {
            Some(markup) => translate::localize_markup(markup),
            None => {
                let mut tree = DepTree::from_parsed(&parsed, self.collapse_punct);
                translate::localize_tree(&mut tree);
                self.renderer.render(&tree)
            }
        };

        Ok(Analysis { breakdown, tree })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{BuiltinPipeline, ParsedSentence, Token};
    use async_trait::async_trait;

    /// Pipeline returning canned markup, like a sidecar that renders its own trees.
    struct MarkupPipeline;

    #[async_trait]
    impl NlpPipeline for MarkupPipeline {
        fn name(&self) -> &str {
            "markup"
        }

        async fn parse(&self, _sentence: &str) -> Result<ParsedSentence, anyhow::Error> {
            Ok(ParsedSentence {
                tokens: vec![Token {
                    text: "Corre".to_string(),
                    pos: "VERB".to_string(),
                    dep: "ROOT".to_string(),
                    head: 0,
                    whitespace: false,
                }],
                markup: Some("<svg><tspan>VERB</tspan><textPath>advmod</textPath></svg>".to_string()),
            })
        }
    }

    struct FailingPipeline;

    #[async_trait]
    impl NlpPipeline for FailingPipeline {
        fn name(&self) -> &str {
            "failing"
        }

        async fn parse(&self, _sentence: &str) -> Result<ParsedSentence, anyhow::Error> {
            anyhow::bail!("model crashed")
        }
    }

    fn analyzer(pipeline: Arc<dyn NlpPipeline>) -> Analyzer {
        Analyzer::new(pipeline, RenderOptions::default(), true)
    }

    #[tokio::test]
    async fn analyzes_with_builtin_pipeline() {
        let analysis = analyzer(Arc::new(BuiltinPipeline::new()))
            .analyze("El gato duerme.")
            .await
            .unwrap();

        assert_eq!(
            analysis.breakdown,
            "(Determinante: El)\n(Sustantivo: gato)\n(Verbo: duerme)\n(Signo de puntuación: .)"
        );
        assert!(analysis.tree.contains(">sujeto nominal</textPath>"));
        assert!(analysis.tree.contains(">determinante</textPath>"));
        assert!(analysis.tree.contains(">Sustantivo</tspan>"));
        assert!(!analysis.tree.contains(">nsubj<"));
        assert!(!analysis.tree.contains(">NOUN<"));
    }

    #[tokio::test]
    async fn empty_sentence_is_rejected_before_parsing() {
        let err = analyzer(Arc::new(FailingPipeline)).analyze("").await.unwrap_err();
        assert!(matches!(err, AppError::MissingSentence));
    }

    #[tokio::test]
    async fn pipeline_markup_is_localized() {
        let analysis = analyzer(Arc::new(MarkupPipeline)).analyze("Corre").await.unwrap();
        assert_eq!(analysis.breakdown, "(Verbo: Corre)");
        assert_eq!(
            analysis.tree,
            "<svg><tspan>Verbo</tspan><textPath>modificador adverbial</textPath></svg>"
        );
    }

    #[tokio::test]
    async fn pipeline_failures_surface_as_errors() {
        let err = analyzer(Arc::new(FailingPipeline)).analyze("Hola").await.unwrap_err();
        assert!(matches!(err, AppError::Pipeline(_)));
    }
}
