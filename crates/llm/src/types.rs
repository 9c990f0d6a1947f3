//! Chat completion wire types and the transport capability.
//!
//! These mirror the OpenAI-compatible `/chat/completions` shapes. Only the
//! fields this crate sends or reads are modelled; unknown response fields
//! are ignored.

use deepsearch_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::client::InvokeOptions;

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Non-streaming chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl CompletionRequest {
    /// Build the system + user request sent by `invoke`.
    pub fn new(
        model: impl Into<String>,
        system_prompt: &str,
        user_prompt: &str,
        options: &InvokeOptions,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
            temperature: options.temperature(),
            max_tokens: options.max_tokens(),
            stream: false,
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if it carries any.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

/// One completion candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub message: Option<ResponseMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Choice {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            message: Some(ResponseMessage {
                role: Some("assistant".to_string()),
                content: Some(content.into()),
            }),
            ..Self::default()
        }
    }
}

/// Message carried by a completion candidate.
///
/// `role` stays a plain string: compatible endpoints may report roles
/// outside [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Capability that performs one completion round trip.
///
/// Implementations own the wire format and endpoint; callers see only
/// typed requests and responses. Must be safe to share across tasks.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn create(&self, request: &CompletionRequest) -> AppResult<CompletionResponse>;
}
