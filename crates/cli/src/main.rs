//! deepsearch CLI
//!
//! Resolves configuration from `myconfig.py`, `config.env`, or `.env` and
//! talks to an OpenAI-compatible model.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ConfigCommand};
use deepsearch_core::{config::load_settings, logging, AppResult, Profile};
use std::path::PathBuf;

/// deepsearch - configuration and LLM access for the research agent
#[derive(Parser, Debug)]
#[command(name = "deepsearch")]
#[command(about = "Configuration and LLM access for the research agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: first of myconfig.py, config.env, .env)
    #[arg(short, long, global = true, env = "DEEPSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Key mapping for script configs (basic, advanced)
    #[arg(short, long, global = true, env = "DEEPSEARCH_PROFILE", default_value = "basic")]
    profile: Profile,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the resolved configuration with secrets masked
    Config(ConfigCommand),

    /// Ask the configured model a question
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Verbose mode implies debug logging
    let log_level = match (cli.verbose, cli.log_level.as_deref()) {
        (_, Some(level)) => Some(level),
        (true, None) => Some("debug"),
        (false, None) => None,
    };
    logging::init_logging(log_level, cli.no_color)?;

    tracing::info!("deepsearch starting");
    tracing::debug!(profile = %cli.profile, config = ?cli.config, "Resolving configuration");

    // Configuration errors stop here, before any client exists
    let settings = load_settings(cli.config.as_deref(), cli.profile)?;

    let command_name = match &cli.command {
        Commands::Config(_) => "config",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Config(cmd) => cmd.execute(&settings),
        Commands::Ask(cmd) => cmd.execute(&settings).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
