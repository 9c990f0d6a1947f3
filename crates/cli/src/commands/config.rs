//! Config command handler.
//!
//! Prints the resolved settings with credentials masked.

use clap::Args;
use deepsearch_core::{AppResult, Settings};

/// Show the resolved configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConfigCommand {
    pub fn execute(&self, settings: &Settings) -> AppResult<()> {
        let summary = settings.summary();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", summary);
        }
        Ok(())
    }
}
