//! Ask command handler.
//!
//! Sends one system + user prompt pair to the configured model.

use clap::Args;
use deepsearch_core::{AppError, AppResult, Settings};
use deepsearch_llm::{create_client, InvokeOptions};
use std::path::PathBuf;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful research assistant.";

/// Ask the configured model a question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub prompt: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "prompt")]
    pub file: Option<PathBuf>,

    /// System prompt
    #[arg(short, long, default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system: String,

    /// Temperature for response generation
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Maximum tokens in response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Extra options as a JSON object; unknown keys are ignored
    #[arg(long)]
    pub options: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, settings: &Settings) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let user_prompt = self.user_prompt()?;
        let options = self.invoke_options()?;
        tracing::debug!(?options, "Invoke options");

        let client = create_client(settings)?;
        let answer = client.invoke(&self.system, &user_prompt, &options).await?;

        if self.json {
            let output = serde_json::json!({
                "answer": answer,
                "model": client.model_info(),
                "provider": client.provider_name(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }

    fn user_prompt(&self) -> AppResult<String> {
        if let Some(ref prompt) = self.prompt {
            return Ok(prompt.clone());
        }
        if let Some(ref path) = self.file {
            return Ok(std::fs::read_to_string(path)?);
        }
        Err(AppError::Config("No prompt provided".to_string()))
    }

    /// JSON options first, then explicit flags on top.
    fn invoke_options(&self) -> AppResult<InvokeOptions> {
        let mut options = match self.options {
            Some(ref raw) => InvokeOptions::from_json(serde_json::from_str(raw)?)?,
            None => InvokeOptions::default(),
        };

        if let Some(temperature) = self.temperature {
            options = options.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> AskCommand {
        AskCommand {
            prompt: Some("What is Rust?".to_string()),
            file: None,
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: None,
            max_tokens: None,
            options: None,
            json: false,
        }
    }

    #[test]
    fn test_flags_override_json_options() {
        let cmd = AskCommand {
            options: Some(r#"{"temperature": 0.3, "max_tokens": 100, "top_p": 1}"#.to_string()),
            max_tokens: Some(50),
            ..command()
        };
        let options = cmd.invoke_options().unwrap();
        assert_eq!(options.temperature(), 0.3);
        assert_eq!(options.max_tokens(), 50);
    }

    #[test]
    fn test_missing_prompt() {
        let cmd = AskCommand {
            prompt: None,
            ..command()
        };
        assert!(matches!(cmd.user_prompt(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_options_json() {
        let cmd = AskCommand {
            options: Some("not json".to_string()),
            ..command()
        };
        assert!(matches!(
            cmd.invoke_options(),
            Err(AppError::Serialization(_))
        ));
    }
}
