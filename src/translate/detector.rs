use std::sync::Arc;
use tracing::debug;
use isolang::Language;
use whatlang::{Detector, Lang};

use super::error::{TranslateError, TranslateResult};

/// Fallible source-language heuristic.
pub trait LanguageDetector: Send + Sync {
    /// Best-guess short ISO code for `text`.
    fn detect(&self, text: &str) -> TranslateResult<String>;
}

/// Trigram detection backed by `whatlang`.
pub struct WhatlangDetector {
    detector: Detector,
}

impl WhatlangDetector {
    pub fn new() -> Self {
        debug!("Initializing whatlang language detector");
        Self {
            detector: Detector::new(),
        }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> TranslateResult<String> {
        let info = self
            .detector
            .detect(text)
            .ok_or_else(|| TranslateError::Detection("no features in text".to_string()))?;

        debug!(
            "Detected {:?} (confidence {:.2}, reliable {})",
            info.lang(),
            info.confidence(),
            info.is_reliable()
        );
        if !info.is_reliable() {
            return Err(TranslateError::Detection(format!(
                "unreliable guess {:?} (confidence {:.2})",
                info.lang(),
                info.confidence()
            )));
        }

        short_code(info.lang())
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::Detection(format!("{:?} has no two-letter code", info.lang()))
            })
    }
}

/// ISO-639-1 code for a detected language.
///
/// whatlang reports individual languages where ISO-639-1 only names the
/// macrolanguage, so those are mapped by hand.
fn short_code(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Cmn => Some("zh"),
        Lang::Pes => Some("fa"),
        other => Language::from_639_3(other.code()).and_then(|l| l.to_639_1()),
    }
}

/// Total wrapper: any detection failure becomes the default code.
pub struct FallbackDetector {
    inner: Arc<dyn LanguageDetector>,
    default_code: String,
}

impl FallbackDetector {
    pub fn new(inner: Arc<dyn LanguageDetector>, default_code: impl Into<String>) -> Self {
        Self {
            inner,
            default_code: default_code.into(),
        }
    }

    pub fn detect_or_default(&self, text: &str) -> String {
        match self.inner.detect(text) {
            Ok(code) if !code.trim().is_empty() => code,
            Ok(_) => {
                debug!("Detector returned an empty code, using {}", self.default_code);
                self.default_code.clone()
            }
            Err(e) => {
                debug!("{}, using {}", e, self.default_code);
                self.default_code.clone()
            }
        }
    }
}
