use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use super::detector::FallbackDetector;
use super::interface::{TargetOutcome, TranslationRequest, TranslationResult};
use super::invoker::TranslationInvoker;

/// Entry point for one translation request across many target languages.
///
/// The source language is resolved once per request. Every target is then
/// attempted exactly once and a failing target only affects its own entry.
pub struct BatchOrchestrator {
    detector: FallbackDetector,
    invoker: TranslationInvoker,
    parallel_targets: bool,
}

impl BatchOrchestrator {
    pub fn new(detector: FallbackDetector, invoker: TranslationInvoker) -> Self {
        Self {
            detector,
            invoker,
            parallel_targets: false,
        }
    }

    /// Run the per-target calls concurrently instead of one after another.
    pub fn with_parallel_targets(mut self, parallel: bool) -> Self {
        self.parallel_targets = parallel;
        self
    }

    pub fn invoker(&self) -> &TranslationInvoker {
        &self.invoker
    }

    pub async fn handle(&self, request: &TranslationRequest) -> TranslationResult {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("translate", %request_id);
        self.handle_inner(request).instrument(span).await
    }

    async fn handle_inner(&self, request: &TranslationRequest) -> TranslationResult {
        let source = self.resolve_source(request);
        info!(
            "Translating {} chars from {} into {:?}",
            request.text.len(),
            source,
            request.target_langs
        );

        let outcomes: Vec<(String, TargetOutcome)> = if self.parallel_targets {
            join_all(
                request
                    .target_langs
                    .iter()
                    .map(|target| self.translate_target(&request.text, target, &source)),
            )
            .await
        } else {
            let mut outcomes = Vec::with_capacity(request.target_langs.len());
            for target in &request.target_langs {
                outcomes.push(self.translate_target(&request.text, target, &source).await);
            }
            outcomes
        };

        let translated = outcomes.iter().filter(|(_, o)| o.is_translated()).count();
        info!("{} of {} targets translated", translated, outcomes.len());

        let translations: BTreeMap<String, String> = outcomes
            .into_iter()
            .map(|(target, outcome)| (target, outcome.to_string()))
            .collect();

        TranslationResult {
            translations,
            detected_lang: source,
        }
    }

    /// Explicit non-empty source wins; otherwise detect, falling back to the default.
    fn resolve_source(&self, request: &TranslationRequest) -> String {
        match request.source_lang.as_deref() {
            Some(lang) if !lang.is_empty() => lang.to_string(),
            _ => self.detector.detect_or_default(&request.text),
        }
    }

    async fn translate_target(
        &self,
        text: &str,
        target: &str,
        source: &str,
    ) -> (String, TargetOutcome) {
        let outcome = match self.invoker.translate(text, target, source).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Translation into {} failed: {}", target, e);
                TargetOutcome::Failed(e.to_string())
            }
        };
        (target.to_string(), outcome)
    }
}
