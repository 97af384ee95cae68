use std::sync::Arc;
use tracing::debug;

use super::error::TranslateResult;
use super::interface::{GenerationRequest, TargetOutcome, TranslationModel};
use super::languages::LanguageCodeTable;

/// Output bound for NLLB-200 generation
pub const DEFAULT_MAX_LENGTH: usize = 200;

/// Control tokens the model may leave in its output
const SPECIAL_TOKENS: &[&str] = &["<s>", "</s>", "<pad>", "<unk>", "<mask>"];

/// Translates one text into one target language
pub struct TranslationInvoker {
    model: Arc<dyn TranslationModel>,
    languages: Arc<LanguageCodeTable>,
    max_length: usize,
}

impl TranslationInvoker {
    pub fn new(
        model: Arc<dyn TranslationModel>,
        languages: Arc<LanguageCodeTable>,
        max_length: usize,
    ) -> Self {
        Self {
            model,
            languages,
            max_length,
        }
    }

    pub fn languages(&self) -> &LanguageCodeTable {
        &self.languages
    }

    /// Translate `text` from `source` into `target` (both short codes).
    ///
    /// Empty input and unknown targets come back as outcomes without a model
    /// call. Model errors are returned as `Err` for the caller to contain.
    pub async fn translate(
        &self,
        text: &str,
        target: &str,
        source: &str,
    ) -> TranslateResult<TargetOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(TargetOutcome::EmptyInput);
        }

        let src_tag = self.languages.resolve_source(source);
        let tgt_tag = match self.languages.resolve(target) {
            Some(tag) => tag,
            None => return Ok(TargetOutcome::UnsupportedTarget(target.to_string())),
        };

        let request = GenerationRequest {
            text: text.to_string(),
            src_lang: src_tag.to_string(),
            tgt_lang: tgt_tag.to_string(),
            max_length: self.max_length,
            num_return_sequences: 1,
        };

        debug!("Generating {} -> {} ({} chars)", src_tag, tgt_tag, text.len());
        let raw = self.model.generate(&request).await?;
        Ok(TargetOutcome::Translated(self.decode(&raw)))
    }

    /// Strip special tokens and the leading language tag from raw model output.
    fn decode(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for token in SPECIAL_TOKENS {
            text = text.replace(token, "");
        }
        let text = text.trim();

        // The forced target tag leads the output; tags elsewhere are content.
        match text.split_once(char::is_whitespace) {
            Some((first, rest)) if self.languages.is_language_tag(first) => rest.trim().to_string(),
            None if self.languages.is_language_tag(text) => String::new(),
            _ => text.to_string(),
        }
    }
}
