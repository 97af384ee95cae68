//! Translate interface - the model itself runs in the model worker service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::error::TranslateResult;

/// Inbound body of `POST /translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_langs: Vec<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
}

/// Response body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// One entry per requested code; duplicate codes share a key.
    pub translations: BTreeMap<String, String>,
    /// Short code actually used as the source.
    pub detected_lang: String,
}

/// What happened for a single target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    Translated(String),
    EmptyInput,
    UnsupportedTarget(String),
    Failed(String),
}

impl TargetOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, TargetOutcome::Translated(_))
    }
}

/// Renders the string placed in `translations` for this target.
impl fmt::Display for TargetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOutcome::Translated(text) => f.write_str(text),
            TargetOutcome::EmptyInput => f.write_str("Empty input"),
            TargetOutcome::UnsupportedTarget(code) => {
                write!(f, "Unsupported target language: {}", code)
            }
            TargetOutcome::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

/// One generation call against the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub text: String,
    /// Model tag of the source language
    pub src_lang: String,
    /// Model tag forced as the first generated token
    pub tgt_lang: String,
    pub max_length: usize,
    pub num_return_sequences: usize,
}

/// Pretrained translation model capability
#[async_trait]
pub trait TranslationModel: Send + Sync {
    /// Generate a single best translation.
    ///
    /// # Returns
    /// The raw decoded output, which may still contain special tokens
    async fn generate(&self, request: &GenerationRequest) -> TranslateResult<String>;

    /// Whether the model backend is reachable
    async fn health_check(&self) -> TranslateResult<bool> {
        Ok(true)
    }
}
