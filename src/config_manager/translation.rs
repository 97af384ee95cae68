use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::translate::invoker::DEFAULT_MAX_LENGTH;

/// Configuration for the translation model and orchestration policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(rename = "model_name")]
    #[serde(default = "default_model_name")]
    pub model_name: String,

    #[serde(rename = "model_service_url")]
    #[serde(default = "default_model_service_url")]
    pub model_service_url: String,

    /// Upper bound on generated tokens per target
    #[serde(rename = "max_length")]
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Short code used when detection fails
    #[serde(rename = "default_source_lang")]
    #[serde(default = "default_source_lang")]
    pub default_source_lang: String,

    #[serde(rename = "parallel_targets")]
    #[serde(default)]
    pub parallel_targets: bool,

    /// Set when the model worker cannot handle concurrent generate calls
    #[serde(rename = "serialize_model_calls")]
    #[serde(default)]
    pub serialize_model_calls: bool,

    #[serde(rename = "request_timeout_secs")]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Additional or overriding short code -> model tag entries
    #[serde(rename = "extra_languages")]
    #[serde(default)]
    pub extra_languages: HashMap<String, String>,
}

fn default_model_name() -> String {
    "facebook/nllb-200-3.3B".to_string()
}

fn default_model_service_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl TranslationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_length == 0 {
            return Err("max_length must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.model_service_url.trim().is_empty() {
            return Err("model_service_url must not be empty".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            model_service_url: default_model_service_url(),
            max_length: default_max_length(),
            default_source_lang: default_source_lang(),
            parallel_targets: false,
            serialize_model_calls: false,
            request_timeout_secs: default_request_timeout_secs(),
            extra_languages: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: TranslationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.model_name, "facebook/nllb-200-3.3B");
        assert_eq!(config.max_length, 200);
        assert_eq!(config.default_source_lang, "en");
        assert!(!config.parallel_targets);
        assert!(config.extra_languages.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let config = TranslationConfig {
            max_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
