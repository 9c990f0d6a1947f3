//! OpenAI-compatible HTTP transport.
//!
//! Posts to `{base_url}/chat/completions` with bearer authentication. Works
//! with DeepSeek, OpenAI, and other endpoints speaking the same protocol.

use std::fmt;

use deepsearch_core::{AppError, AppResult};

use crate::types::{CompletionProvider, CompletionRequest, CompletionResponse};

/// reqwest-backed [`CompletionProvider`].
pub struct HttpCompletionProvider {
    /// Endpoint root, without trailing slash
    base_url: String,

    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpCompletionProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl fmt::Debug for HttpCompletionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCompletionProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for HttpCompletionProvider {
    async fn create(&self, request: &CompletionRequest) -> AppResult<CompletionResponse> {
        let url = self.endpoint();
        tracing::debug!(url = %url, model = %request.model, "POST chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to send request to {}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Provider(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse completion response: {}", e)))
    }
}
