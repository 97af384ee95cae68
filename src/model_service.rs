use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::interface::{GenerationRequest, TranslationModel};

/// HTTP client for the model worker hosting the pretrained translation model
#[derive(Debug, Clone)]
pub struct ModelServiceClient {
    client: Client,
    base_url: String,
    model_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub text: String,
    pub src_lang: String,
    pub forced_bos_token: String,
    pub max_length: usize,
    pub num_return_sequences: usize,
    pub skip_special_tokens: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub text: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelServiceClient {
    pub fn new(base_url: String, model_name: String, timeout: Duration) -> TranslateResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate_raw(&self, request: GenerateRequest) -> TranslateResult<GenerateResponse> {
        let url = format!("{}/generate", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::ModelService {
                status: status.as_u16(),
                body,
            });
        }

        let result: GenerateResponse = response.json().await?;
        Ok(result)
    }

    pub async fn check_health(&self) -> TranslateResult<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl TranslationModel for ModelServiceClient {
    async fn generate(&self, request: &GenerationRequest) -> TranslateResult<String> {
        let body = GenerateRequest {
            model: self.model_name.clone(),
            text: request.text.clone(),
            src_lang: request.src_lang.clone(),
            forced_bos_token: request.tgt_lang.clone(),
            max_length: request.max_length,
            num_return_sequences: request.num_return_sequences,
            skip_special_tokens: true,
        };

        debug!("Sending generation request: {} -> {}", body.src_lang, body.forced_bos_token);
        let response = self.generate_raw(body).await?;

        match response {
            GenerateResponse {
                success: true,
                text: Some(text),
                ..
            } => Ok(text),
            GenerateResponse { error, .. } => {
                let error_msg = error.unwrap_or_else(|| "Unknown error".to_string());
                error!("Model generation failed: {}", error_msg);
                Err(TranslateError::Generation(error_msg))
            }
        }
    }

    async fn health_check(&self) -> TranslateResult<bool> {
        self.check_health().await
    }
}
