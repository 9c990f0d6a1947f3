//! LLM provider abstraction.
//!
//! Callers depend on [`LlmProvider`] only. Each wire format gets its own
//! implementation; [`crate::LlmClient`] is the OpenAI-compatible one.

use deepsearch_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Per-call tuning overrides.
///
/// Deserializes from any JSON object; keys other than `temperature` and
/// `max_tokens` are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeOptions {
    /// Sampling temperature (defaults to 0.7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate (defaults to 4000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl InvokeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read recognized overrides from a JSON object.
    pub fn from_json(value: serde_json::Value) -> AppResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

/// Identity of the model a provider talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model: String,
    pub base_url: String,
}

/// Capability set shared by every LLM provider.
///
/// `invoke` performs exactly one non-streaming completion and never retries;
/// retry policy belongs to the caller.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &str;

    /// Send a system + user prompt pair and return the reply text.
    ///
    /// An empty reply (no candidates, or a candidate without content) is
    /// returned as an empty string, not an error.
    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &InvokeOptions,
    ) -> AppResult<String>;

    /// Model and endpoint this provider is bound to.
    fn model_info(&self) -> ModelInfo;

    /// Normalize raw reply content. Must not fail.
    ///
    /// The default passes text through unchanged and maps a missing reply to
    /// the empty string.
    fn validate_response(&self, content: Option<String>) -> String {
        content.unwrap_or_default()
    }
}

/// Reject an absent or empty required value.
pub(crate) fn require(value: Option<String>, err: fn() -> AppError) -> AppResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(err()),
    }
}
