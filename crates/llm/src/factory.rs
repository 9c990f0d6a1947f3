//! LLM client factory.
//!
//! Builds the provider for a resolved [`Settings`]. Construction fails
//! before any network activity when the settings lack a credential,
//! endpoint, or model.

use std::sync::Arc;

use deepsearch_core::{AppResult, Settings};

use crate::client::LlmProvider;
use crate::llm_client::LlmClient;

/// Create an LLM provider from resolved settings.
///
/// # Errors
/// Returns `MissingCredential`, `MissingEndpoint`, or `MissingModel` when
/// the corresponding setting is absent. An empty model counts as absent.
pub fn create_client(settings: &Settings) -> AppResult<Arc<dyn LlmProvider>> {
    let model = (!settings.model.is_empty()).then(|| settings.model.clone());
    let client = LlmClient::new(settings.api_key.clone(), settings.base_url.clone(), model)?;
    Ok(Arc::new(client))
}
