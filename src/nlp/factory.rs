use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use super::{BuiltinPipeline, NlpPipeline, RemotePipeline};
use crate::config::{NlpBackend, NlpConfig};

/// Factory for creating the NLP pipeline
pub struct PipelineFactory;

impl PipelineFactory {
    /// Create a pipeline based on configuration
    ///
    /// # Arguments
    /// * `nlp_config` - NLP section of the application config
    ///
    /// # Returns
    /// Shared NlpPipeline implementation
    pub fn create(nlp_config: &NlpConfig) -> Result<Arc<dyn NlpPipeline>> {
        match nlp_config.backend {
            NlpBackend::Builtin => {
                info!("Initializing built-in Spanish pipeline");
                Ok(Arc::new(BuiltinPipeline::new()))
            }
            NlpBackend::Remote => {
                info!(
                    "Initializing remote NLP pipeline: {} (model={})",
                    nlp_config.service_url, nlp_config.model
                );
                let remote = RemotePipeline::new(
                    nlp_config.service_url.clone(),
                    nlp_config.model.clone(),
                    Duration::from_secs(nlp_config.timeout_secs),
                )?;
                Ok(Arc::new(remote))
            }
        }
    }
}
