//! LLM integration crate for deepsearch.
//!
//! Provider-agnostic access to chat completion models. Callers hold an
//! `Arc<dyn LlmProvider>` and never see the wire format.
//!
//! # Providers
//! - **OpenAI-compatible**: DeepSeek, OpenAI, and compatible endpoints
//!
//! # Example
//! ```no_run
//! use deepsearch_core::{ConfigResolver, Profile};
//! use deepsearch_llm::{create_client, InvokeOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConfigResolver::new().resolve(None, Profile::Basic)?;
//! let client = create_client(&settings)?;
//! let reply = client
//!     .invoke("You are a research assistant.", "Hello!", &InvokeOptions::default())
//!     .await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod llm_client;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{InvokeOptions, LlmProvider, ModelInfo};
pub use factory::create_client;
pub use llm_client::LlmClient;
pub use providers::HttpCompletionProvider;
pub use types::{ChatMessage, CompletionProvider, CompletionRequest, CompletionResponse, Role};
