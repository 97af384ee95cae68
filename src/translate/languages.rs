use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::error::{TranslateError, TranslateResult};

/// Model tag used for the source when nothing better is known.
pub const DEFAULT_SOURCE_TAG: &str = "eng_Latn";

/// Built-in NLLB-200 mapping: short code, model tag, display name.
const BUILTIN_LANGUAGES: &[(&str, &str, &str)] = &[
    ("ar", "arb_Arab", "العربية (Arabic)"),
    ("cs", "ces_Latn", "Čeština (Czech)"),
    ("de", "deu_Latn", "Deutsch (German)"),
    ("en", "eng_Latn", "English (English)"),
    ("es", "spa_Latn", "Español (Spanish)"),
    ("fa", "pes_Arab", "فارسی (Persian)"),
    ("fi", "fin_Latn", "Suomi (Finnish)"),
    ("fr", "fra_Latn", "Français (French)"),
    ("he", "heb_Hebr", "עברית (Hebrew)"),
    ("hi", "hin_Deva", "हिन्दी (Hindi)"),
    ("it", "ita_Latn", "Italiano (Italian)"),
    ("ja", "jpn_Jpan", "日本語 (Japanese)"),
    ("ko", "kor_Hang", "한국어 (Korean)"),
    ("nl", "nld_Latn", "Nederlands (Dutch)"),
    ("pl", "pol_Latn", "Polski (Polish)"),
    ("pt", "por_Latn", "Português (Portuguese)"),
    ("ro", "ron_Latn", "Română (Romanian)"),
    ("ru", "rus_Cyrl", "Русский (Russian)"),
    ("sv", "swe_Latn", "Svenska (Swedish)"),
    ("ta", "tam_Taml", "தமிழ் (Tamil)"),
    ("tr", "tur_Latn", "Türkçe (Turkish)"),
    ("uk", "ukr_Cyrl", "Українська (Ukrainian)"),
    ("vi", "vie_Latn", "Tiếng Việt (Vietnamese)"),
    ("zh", "zho_Hans", "中文 (Chinese)"),
];

/// One row of the table as exposed by `GET /api/languages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub code: String,
    pub tag: String,
    pub name: Option<String>,
}

/// Short ISO code -> model-specific tag.
///
/// Built once at startup and shared read-only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct LanguageCodeTable {
    tags: HashMap<String, String>,
    names: HashMap<String, String>,
    default_source_code: String,
    default_source_tag: String,
}

impl LanguageCodeTable {
    /// Table with the built-in entries and `en` as default source.
    pub fn builtin() -> Self {
        let tags = BUILTIN_LANGUAGES
            .iter()
            .map(|(code, tag, _)| (code.to_string(), tag.to_string()))
            .collect();
        let names = BUILTIN_LANGUAGES
            .iter()
            .map(|(code, _, name)| (code.to_string(), name.to_string()))
            .collect();

        Self {
            tags,
            names,
            default_source_code: "en".to_string(),
            default_source_tag: DEFAULT_SOURCE_TAG.to_string(),
        }
    }

    /// Built-in table extended (or overridden) with `extra` entries.
    ///
    /// Fails if `default_source_code` does not resolve, since every fallback
    /// source lookup would then point at nothing.
    pub fn with_overrides(
        extra: &HashMap<String, String>,
        default_source_code: &str,
    ) -> TranslateResult<Self> {
        let mut table = Self::builtin();
        for (code, tag) in extra {
            if code.trim().is_empty() || tag.trim().is_empty() {
                return Err(TranslateError::Config(format!(
                    "language entry '{}' -> '{}' must not be blank",
                    code, tag
                )));
            }
            debug!("Registering language {} -> {}", code, tag);
            table.tags.insert(code.clone(), tag.clone());
        }

        let default_source_tag = table
            .resolve(default_source_code)
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::Config(format!(
                    "default source language '{}' is not in the language table",
                    default_source_code
                ))
            })?;

        table.default_source_code = default_source_code.to_string();
        table.default_source_tag = default_source_tag;
        Ok(table)
    }

    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.tags.get(code).map(String::as_str)
    }

    /// Source lookups never fail: unknown codes map to the default tag.
    pub fn resolve_source(&self, code: &str) -> &str {
        self.resolve(code).unwrap_or(&self.default_source_tag)
    }

    pub fn default_source_code(&self) -> &str {
        &self.default_source_code
    }

    pub fn default_source_tag(&self) -> &str {
        &self.default_source_tag
    }

    /// Whether `token` is one of the model tags rather than text.
    pub fn is_language_tag(&self, token: &str) -> bool {
        self.tags.values().any(|tag| tag == token)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// All entries sorted by short code.
    pub fn entries(&self) -> Vec<LanguageEntry> {
        let sorted: BTreeMap<&String, &String> = self.tags.iter().collect();
        sorted
            .into_iter()
            .map(|(code, tag)| LanguageEntry {
                code: code.clone(),
                tag: tag.clone(),
                name: self.names.get(code).cloned(),
            })
            .collect()
    }
}

impl Default for LanguageCodeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_codes() {
        let table = LanguageCodeTable::builtin();
        assert_eq!(table.resolve("en"), Some("eng_Latn"));
        assert_eq!(table.resolve("fr"), Some("fra_Latn"));
        assert_eq!(table.resolve("zh"), Some("zho_Hans"));
        assert_eq!(table.resolve("fa"), Some("pes_Arab"));
        assert_eq!(table.len(), 24);
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let table = LanguageCodeTable::builtin();
        assert_eq!(table.resolve("xx"), None);
        assert_eq!(table.resolve(""), None);
        // Lookups are exact.
        assert_eq!(table.resolve("EN"), None);
    }

    #[test]
    fn test_resolve_source_falls_back_to_default() {
        let table = LanguageCodeTable::builtin();
        assert_eq!(table.resolve_source("de"), "deu_Latn");
        assert_eq!(table.resolve_source("klingon"), DEFAULT_SOURCE_TAG);
    }

    #[test]
    fn test_overrides_extend_and_replace() {
        let mut extra = HashMap::new();
        extra.insert("sw".to_string(), "swh_Latn".to_string());
        extra.insert("zh".to_string(), "zho_Hant".to_string());

        let table = LanguageCodeTable::with_overrides(&extra, "fr").unwrap();
        assert_eq!(table.resolve("sw"), Some("swh_Latn"));
        assert_eq!(table.resolve("zh"), Some("zho_Hant"));
        assert_eq!(table.default_source_code(), "fr");
        assert_eq!(table.resolve_source("unknown"), "fra_Latn");
    }

    #[test]
    fn test_default_source_must_be_known() {
        let err = LanguageCodeTable::with_overrides(&HashMap::new(), "xx").unwrap_err();
        assert!(matches!(err, TranslateError::Config(_)));
    }

    #[test]
    fn test_blank_override_rejected() {
        let mut extra = HashMap::new();
        extra.insert("sw".to_string(), " ".to_string());
        assert!(LanguageCodeTable::with_overrides(&extra, "en").is_err());
    }

    #[test]
    fn test_entries_sorted_with_names() {
        let entries = LanguageCodeTable::builtin().entries();
        assert_eq!(entries.first().map(|e| e.code.as_str()), Some("ar"));
        assert_eq!(entries.last().map(|e| e.code.as_str()), Some("zh"));
        let fr = entries.iter().find(|e| e.code == "fr").unwrap();
        assert_eq!(fr.tag, "fra_Latn");
        assert_eq!(fr.name.as_deref(), Some("Français (French)"));
    }

    #[test]
    fn test_is_language_tag() {
        let table = LanguageCodeTable::builtin();
        assert!(table.is_language_tag("fra_Latn"));
        assert!(!table.is_language_tag("fr"));
        assert!(!table.is_language_tag("Bonjour"));
    }
}
