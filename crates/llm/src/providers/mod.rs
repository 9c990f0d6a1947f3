//! Completion transports.

pub mod openai;

pub use openai::HttpCompletionProvider;
