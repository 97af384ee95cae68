use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::error::TranslateResult;
use super::interface::{GenerationRequest, TranslationModel};

/// Serializes generation calls for model workers that cannot run concurrently.
pub struct SerializedModel {
    inner: Arc<dyn TranslationModel>,
    lock: Mutex<()>,
}

impl SerializedModel {
    pub fn new(inner: Arc<dyn TranslationModel>) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl TranslationModel for SerializedModel {
    async fn generate(&self, request: &GenerationRequest) -> TranslateResult<String> {
        let _guard = self.lock.lock().await;
        self.inner.generate(request).await
    }

    async fn health_check(&self) -> TranslateResult<bool> {
        self.inner.health_check().await
    }
}
