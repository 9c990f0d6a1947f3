//! OpenAI-compatible LLM client.

use std::fmt;

use deepsearch_core::{AppError, AppResult};

use crate::client::{require, InvokeOptions, LlmProvider, ModelInfo};
use crate::providers::HttpCompletionProvider;
use crate::types::{CompletionProvider, CompletionRequest};

/// [`LlmProvider`] speaking the OpenAI chat completion protocol.
///
/// Holds only immutable configuration and its transport, so one instance
/// can serve concurrent `invoke` calls.
pub struct LlmClient<P = HttpCompletionProvider> {
    base_url: String,
    model: String,
    provider: P,
}

impl LlmClient {
    /// Create a client backed by the HTTP transport.
    ///
    /// Fails with `MissingCredential`, `MissingEndpoint`, or `MissingModel`
    /// (checked in that order). No network I/O happens here.
    ///
    /// # Example
    /// ```
    /// use deepsearch_llm::{LlmClient, LlmProvider};
    ///
    /// let client = LlmClient::new(
    ///     Some("sk-test".to_string()),
    ///     Some("https://api.deepseek.com".to_string()),
    ///     Some("deepseek-chat".to_string()),
    /// )
    /// .unwrap();
    /// assert_eq!(client.model_info().model, "deepseek-chat");
    /// ```
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        model_name: Option<String>,
    ) -> AppResult<Self> {
        Self::with_transport(api_key, base_url, model_name, |key, url| {
            HttpCompletionProvider::new(key, url)
        })
    }
}

impl<P: CompletionProvider> LlmClient<P> {
    /// Create a client whose transport is built by `make` from the
    /// credential and endpoint. `make` runs only after all checks pass.
    pub fn with_transport<F>(
        api_key: Option<String>,
        base_url: Option<String>,
        model_name: Option<String>,
        make: F,
    ) -> AppResult<Self>
    where
        F: FnOnce(&str, &str) -> P,
    {
        let api_key = api_key.ok_or(AppError::MissingCredential)?;
        let base_url = base_url.ok_or(AppError::MissingEndpoint)?;
        let model = require(model_name, || AppError::MissingModel)?;

        let provider = make(&api_key, &base_url);
        tracing::debug!(model = %model, base_url = %base_url, "LLM client ready");

        Ok(Self {
            base_url,
            model,
            provider,
        })
    }
}

impl<P> fmt::Debug for LlmClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<P: CompletionProvider> LlmProvider for LlmClient<P> {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &InvokeOptions,
    ) -> AppResult<String> {
        let request = CompletionRequest::new(&self.model, system_prompt, user_prompt, options);
        tracing::debug!(
            model = %self.model,
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let response = match self.provider.create(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(endpoint = %self.base_url, error = %e, "LLM call failed");
                return Err(e);
            }
        };

        if response.choices.is_empty() {
            tracing::warn!(endpoint = %self.base_url, "Completion returned no choices");
        }

        Ok(self.validate_response(response.first_content()))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Choice, CompletionResponse};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    enum Reply {
        Choices(Vec<Choice>),
        Fail(&'static str),
    }

    /// Transport double that records calls and returns a scripted reply.
    #[derive(Clone)]
    struct StubProvider {
        calls: Arc<AtomicUsize>,
        last_request: Arc<Mutex<Option<CompletionRequest>>>,
        reply: Arc<Reply>,
    }

    impl StubProvider {
        fn new(reply: Reply) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(Mutex::new(None)),
                reply: Arc::new(reply),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for StubProvider {
        async fn create(&self, request: &CompletionRequest) -> AppResult<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match self.reply.as_ref() {
                Reply::Choices(choices) => Ok(CompletionResponse {
                    choices: choices.clone(),
                    model: None,
                }),
                Reply::Fail(message) => Err(AppError::Provider(message.to_string())),
            }
        }
    }

    fn client(stub: &StubProvider) -> LlmClient<StubProvider> {
        LlmClient::with_transport(
            Some("sk-test".into()),
            Some("https://x".into()),
            Some("m".into()),
            |_, _| stub.clone(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_credential_before_any_call() {
        let stub = StubProvider::new(Reply::Choices(vec![]));
        let mut built = false;

        let result = LlmClient::with_transport(
            None,
            Some("https://x".into()),
            Some("m".into()),
            |_, _| {
                built = true;
                stub.clone()
            },
        );

        assert!(matches!(result, Err(AppError::MissingCredential)));
        assert!(!built);
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_missing_endpoint_and_model() {
        let err = LlmClient::new(Some("k".into()), None, Some("m".into())).unwrap_err();
        assert!(matches!(err, AppError::MissingEndpoint));

        let err = LlmClient::new(Some("k".into()), Some("https://x".into()), None).unwrap_err();
        assert!(matches!(err, AppError::MissingModel));

        let err = LlmClient::new(Some("k".into()), Some("https://x".into()), Some(String::new()))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingModel));
    }

    #[test]
    fn test_credential_checked_first() {
        let err = LlmClient::new(None, None, None).unwrap_err();
        assert!(matches!(err, AppError::MissingCredential));
    }

    #[test]
    fn test_model_info() {
        let stub = StubProvider::new(Reply::Choices(vec![]));
        let info = client(&stub).model_info();
        assert_eq!(
            info,
            ModelInfo {
                model: "m".into(),
                base_url: "https://x".into()
            }
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_invoke_sends_one_request() {
        let stub = StubProvider::new(Reply::Choices(vec![Choice::with_content("hello there")]));
        let client = client(&stub);

        let options = InvokeOptions::new().with_temperature(0.2);
        let reply = client.invoke("system text", "user text", &options).await.unwrap();

        assert_eq!(reply, "hello there");
        assert_eq!(stub.calls(), 1);

        let request = stub.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "m");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content, "system text");
        assert_eq!(request.messages[1].content, "user text");
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 4000);
        assert!(!request.stream);
    }

    #[tokio::test]
    async fn test_invoke_accepts_empty_prompts() {
        let stub = StubProvider::new(Reply::Choices(vec![Choice::with_content("ok")]));
        let reply = client(&stub)
            .invoke("", "", &InvokeOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "ok");
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_string() {
        let stub = StubProvider::new(Reply::Choices(vec![]));
        let reply = client(&stub)
            .invoke("s", "u", &InvokeOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_message_is_empty_string() {
        let stub = StubProvider::new(Reply::Choices(vec![Choice::default()]));
        let reply = client(&stub)
            .invoke("s", "u", &InvokeOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_retry() {
        let stub = StubProvider::new(Reply::Fail("connection reset by peer"));
        let err = client(&stub)
            .invoke("s", "u", &InvokeOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Provider(ref m) if m == "connection reset by peer"));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_invokes_share_client() {
        let stub = StubProvider::new(Reply::Choices(vec![Choice::with_content("same")]));
        let client: Arc<dyn LlmProvider> = Arc::new(client(&stub));

        let mut handles = Vec::new();
        for i in 0..4 {
            let client = Arc::clone(&client);
            handles.push(tokio::spawn(async move {
                client
                    .invoke("s", &format!("question {}", i), &InvokeOptions::default())
                    .await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "same");
        }
        assert_eq!(stub.calls(), 4);
    }

    #[test]
    fn test_validate_response_passes_text_through() {
        let stub = StubProvider::new(Reply::Choices(vec![]));
        let client = client(&stub);
        assert_eq!(client.validate_response(Some("  keep spacing ".into())), "  keep spacing ");
        assert_eq!(client.validate_response(None), "");
    }
}
