//! Error types for deepsearch.
//!
//! A single error enum covers configuration resolution, client construction,
//! and provider calls. Absence of an optional value is never an error;
//! malformed or missing-but-required values always are.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for deepsearch.
///
/// Every fallible function returns `Result<T, AppError>`. Nothing here is
/// swallowed or downgraded to a default.
#[derive(Error, Debug)]
pub enum AppError {
    /// No configuration source could be located
    #[error("Configuration file not found (tried: {})", join_paths(.attempted))]
    ConfigNotFound { attempted: Vec<PathBuf> },

    /// A present value could not be parsed into its field type
    #[error("Invalid value for {field}: {value:?}")]
    ConfigParse { field: String, value: String },

    /// Required credentials are absent after parsing
    #[error("Configuration validation failed, missing: {}", .missing.join(", "))]
    InvalidConfig { missing: Vec<String> },

    /// Client construction without an API key
    #[error("API key not found; set it in the configuration file")]
    MissingCredential,

    /// Client construction without a base URL
    #[error("Base URL not found; set it in the configuration file")]
    MissingEndpoint,

    /// Client construction without a model name
    #[error("Model name not found; set it in the configuration file")]
    MissingModel,

    /// Completion call failed at the transport or provider level
    #[error("Provider error: {0}")]
    Provider(String),

    /// Other configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
