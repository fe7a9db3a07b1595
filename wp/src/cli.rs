//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wp - weekend-plan client
#[derive(Parser)]
#[command(
    name = "wp",
    about = "Ask the planner agent backend for a weekend plan",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/weekendplan/logs/weekendplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Request a weekend plan and print it
    Plan {
        /// Location or zip code to plan around
        location: String,

        /// Comma-separated kids' ages, e.g. "4,7"
        #[arg(short, long)]
        ages: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Also print the raw response events
        #[arg(long)]
        raw: bool,
    },

    /// Launch the interactive TUI
    Tui,
}

/// Output format for the plan subcommand
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Log file location, shared by `--help` text and logging setup
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weekendplan")
        .join("logs")
        .join("weekendplan.log")
}
