use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::config_manager::Config;
use crate::translate::{BatchOrchestrator, TranslateFactory, TranslationModel};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<BatchOrchestrator>,
    pub model: Arc<dyn TranslationModel>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let (orchestrator, model) = TranslateFactory::create_pipeline(&config.translation_config)?;
        Ok(Self::from_parts(config, orchestrator, model))
    }

    pub fn from_parts(
        config: Config,
        orchestrator: Arc<BatchOrchestrator>,
        model: Arc<dyn TranslationModel>,
    ) -> Self {
        Self {
            config,
            orchestrator,
            model,
            started_at: Utc::now(),
        }
    }
}
