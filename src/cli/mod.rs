//! CLI module for pethotel-chat
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `chat` - Interactive chat session (default)
//! - `ask` - Send one question and print the answer
//! - `health` - Probe the analytics API
//! - `stats` - Show or reset saved usage statistics
//! - `questions` - List the questions the API can answer
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Chat against a remote API
//! pethotel-chat --base-url http://analytics.local:5000
//!
//! # One-shot question
//! pethotel-chat ask "Quais são os produtos mais vendidos?"
//!
//! # Generate shell completions
//! pethotel-chat completions bash > ~/.bash_completion.d/pethotel-chat
//! ```

pub mod ask;
pub mod chat;
pub mod completions;
pub mod config;
pub mod health;
pub mod output;
pub mod questions;
pub mod stats;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::api::{AnalyticsApi, HttpAnalyticsApi};
use crate::config::ClientConfig;
use crate::storage::{FileStorage, Storage};
use crate::transport::HttpTransport;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Config file picked up from the working directory when `-c` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pethotel-chat.toml";

/// PetHotel AI - terminal chat for the pet hotel analytics assistant
#[derive(Parser, Debug)]
#[command(
    name = "pethotel-chat",
    version,
    about = "Terminal chat client for the PetHotel analytics assistant"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the analytics API base URL
    #[arg(long, global = true, env = "PETHOTEL_API_URL")]
    pub base_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "PETHOTEL_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat(ChatArgs),
    /// Ask a single question
    Ask(AskArgs),
    /// Check whether the API is reachable
    Health(HealthArgs),
    /// Show saved usage statistics
    Stats(StatsArgs),
    /// List the questions the API can answer
    Questions(QuestionsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChatArgs {
    /// Disable health polling and assume the API is online
    #[arg(long)]
    pub no_health_check: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// The question to send
    pub question: String,

    /// Skip the health probe before sending
    #[arg(long)]
    pub no_health_check: bool,

    /// Print the answer without markdown styling
    #[arg(long)]
    pub plain: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct HealthArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Delete the saved statistics
    #[arg(long)]
    pub reset: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct QuestionsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration with CLI overrides
///
/// An explicit `--config` must exist; otherwise `pethotel-chat.toml` in the
/// working directory is used when present.
pub fn load_config(args: &GlobalArgs) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(Some(path.as_path()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            ClientConfig::load(Some(Path::new(DEFAULT_CONFIG_FILE)))?
        }
        None => ClientConfig::default(),
    };

    config = config.with_env_overrides();

    if let Some(ref url) = args.base_url {
        config.api.base_url = url.clone();
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// HTTP-backed API client for `config`
pub fn build_api(config: &ClientConfig) -> Arc<dyn AnalyticsApi> {
    Arc::new(HttpAnalyticsApi::new(HttpTransport::new(&config.api)))
}

/// File storage under the configured state directory
pub fn open_storage(config: &ClientConfig) -> Arc<dyn Storage> {
    Arc::new(FileStorage::new(config.storage.dir.clone()))
}
