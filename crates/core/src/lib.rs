//! Deepsearch Core Library
//!
//! Foundational pieces shared by the deepsearch crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration resolution (`Settings`, `ConfigResolver`)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigResolver, Profile, Settings};
pub use error::{AppError, AppResult};
