use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;

/// Read a configuration file and substitute `${VAR_NAME}` from the environment.
///
/// Unset variables are left as written.
pub fn read_config_text(config_path: &str) -> Result<String> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    if content.trim().is_empty() {
        anyhow::bail!("Configuration file is empty: {}", config_path);
    }

    substitute_env_vars(&content)
}

pub fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

/// Parse configuration text; `.json` / `.jsonld` as JSON, anything else as YAML.
pub fn parse_config(content: &str, config_path: &str) -> Result<Config> {
    let path_lower = config_path.to_lowercase();
    if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
        let json_value: Value = serde_json::from_str(content)?;
        validate_config(&json_value)
    } else {
        let config: Config = serde_yaml::from_str(content)?;
        check_config(config)
    }
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: &Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data.clone())?;
    check_config(config)
}

fn check_config(config: Config) -> Result<Config> {
    config
        .translation_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid translation_config: {}", e))?;
    Ok(config)
}

/// Load text file, dropping a UTF-8 BOM and falling back to GBK for legacy files
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let bytes = fs::read(file_path)?;
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            debug!("{} is not valid UTF-8, decoding as GBK", file_path);
            let (cow, _, _) = encoding_rs::GBK.decode(bytes);
            Ok(cow.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_substitution() {
        std::env::set_var("TRANSLATE_TEST_MODEL_URL", "http://gpu-box:8000");
        let text = substitute_env_vars(
            "url: ${TRANSLATE_TEST_MODEL_URL}\nother: ${TRANSLATE_TEST_UNSET_VAR}",
        )
        .unwrap();
        assert_eq!(
            text,
            "url: http://gpu-box:8000\nother: ${TRANSLATE_TEST_UNSET_VAR}"
        );
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = "system_config:\n  port: 9001\ntranslation_config:\n  max_length: 60\n";
        let config = parse_config(yaml, "conf.yaml").unwrap();
        assert_eq!(config.system_config.port, 9001);
        assert_eq!(config.translation_config.max_length, 60);

        let json = r#"{
            "@context": {"@vocab": "https://example.org/config#"},
            "translation_config": {"default_source_lang": "fr", "parallel_targets": true}
        }"#;
        let config = parse_config(json, "conf.jsonld").unwrap();
        assert_eq!(config.translation_config.default_source_lang, "fr");
        assert!(config.translation_config.parallel_targets);
        assert_eq!(config.system_config.port, 8080);
    }

    #[test]
    fn test_invalid_translation_config_rejected() {
        let json = r#"{"translation_config": {"max_length": 0}}"#;
        assert!(parse_config(json, "conf.json").is_err());

        let yaml = "translation_config:\n  request_timeout_secs: 0\n";
        assert!(parse_config(yaml, "conf.yaml").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(read_config_text("/definitely/not/here/conf.yaml").is_err());
    }

    #[test]
    fn test_bom_is_stripped() {
        let path = std::env::temp_dir().join(format!("translate-bom-{}.yaml", std::process::id()));
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"system_config:\n  port: 9002\n");
        fs::write(&path, bytes).unwrap();

        let path_str = path.to_str().unwrap();
        let text = read_config_text(path_str).unwrap();
        let config = parse_config(&text, path_str).unwrap();
        assert_eq!(config.system_config.port, 9002);

        fs::remove_file(&path).unwrap();
    }
}
