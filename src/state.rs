use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::nlp::{NlpPipeline, PipelineFactory};
use crate::page::IndexPage;
use crate::render::RenderOptions;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<Analyzer>,
    pub page: Arc<IndexPage>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let pipeline = PipelineFactory::create(&config.nlp)?;
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Build state around an already constructed pipeline.
    pub fn with_pipeline(config: Config, pipeline: Arc<dyn NlpPipeline>) -> Self {
        let analyzer = Analyzer::new(
            pipeline,
            RenderOptions::from(&config.render),
            config.render.collapse_punct,
        );
        let page = IndexPage::load(
            &config.server.template_path,
            config.cache.asset_version.as_deref(),
        );

        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            page: Arc::new(page),
        }
    }
}
