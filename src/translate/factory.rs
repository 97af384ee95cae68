use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::config_manager::TranslationConfig;
use crate::model_service::ModelServiceClient;
use super::detector::{FallbackDetector, LanguageDetector, WhatlangDetector};
use super::interface::TranslationModel;
use super::invoker::TranslationInvoker;
use super::languages::LanguageCodeTable;
use super::model::SerializedModel;
use super::orchestrator::BatchOrchestrator;

/// Factory for the translation pipeline
pub struct TranslateFactory;

impl TranslateFactory {
    /// Build the language table from configuration
    pub fn create_languages(config: &TranslationConfig) -> Result<Arc<LanguageCodeTable>> {
        let table =
            LanguageCodeTable::with_overrides(&config.extra_languages, &config.default_source_lang)?;
        info!(
            "Language table ready: {} languages, default source {} ({})",
            table.len(),
            table.default_source_code(),
            table.default_source_tag()
        );
        Ok(Arc::new(table))
    }

    /// Create the model client based on configuration
    pub fn create_model(config: &TranslationConfig) -> Result<Arc<dyn TranslationModel>> {
        info!("Initializing translation model: {}", config.model_name);

        let client = ModelServiceClient::new(
            config.model_service_url.clone(),
            config.model_name.clone(),
            config.request_timeout(),
        )?;

        info!("Model service client ready at {}", client.base_url());

        if config.serialize_model_calls {
            info!("Model calls will be serialized");
            Ok(Arc::new(SerializedModel::new(Arc::new(client))))
        } else {
            Ok(Arc::new(client))
        }
    }

    /// Assemble the orchestrator around an already-built model and detector
    pub fn create_orchestrator(
        config: &TranslationConfig,
        languages: Arc<LanguageCodeTable>,
        model: Arc<dyn TranslationModel>,
        detector: Arc<dyn LanguageDetector>,
    ) -> BatchOrchestrator {
        let detector = FallbackDetector::new(detector, languages.default_source_code());
        let invoker = TranslationInvoker::new(model, languages, config.max_length);
        BatchOrchestrator::new(detector, invoker).with_parallel_targets(config.parallel_targets)
    }

    /// Build the whole pipeline from configuration
    pub fn create_pipeline(
        config: &TranslationConfig,
    ) -> Result<(Arc<BatchOrchestrator>, Arc<dyn TranslationModel>)> {
        let languages = Self::create_languages(config)?;
        let model = Self::create_model(config)?;
        let detector: Arc<dyn LanguageDetector> = Arc::new(WhatlangDetector::new());
        let orchestrator = Self::create_orchestrator(config, languages, model.clone(), detector);
        Ok((Arc::new(orchestrator), model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_pipeline_from_default_config() {
        let config = TranslationConfig::default();
        let (orchestrator, _model) = TranslateFactory::create_pipeline(&config).unwrap();
        assert_eq!(orchestrator.invoker().languages().default_source_code(), "en");
    }

    #[test]
    fn test_unknown_default_source_fails() {
        let config = TranslationConfig {
            default_source_lang: "xx".to_string(),
            ..Default::default()
        };
        assert!(TranslateFactory::create_pipeline(&config).is_err());
    }

    #[test]
    fn test_extra_languages_registered() {
        let mut extra = HashMap::new();
        extra.insert("sw".to_string(), "swh_Latn".to_string());
        let config = TranslationConfig {
            extra_languages: extra,
            serialize_model_calls: true,
            ..Default::default()
        };
        let languages = TranslateFactory::create_languages(&config).unwrap();
        assert_eq!(languages.resolve("sw"), Some("swh_Latn"));
        assert!(TranslateFactory::create_model(&config).is_ok());
    }
}
