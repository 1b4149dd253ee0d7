//! CLI parse: clap types for entrylist. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// entrylist CLI - inspect and maintain stored entry lists
#[derive(Parser)]
#[command(name = "entrylist")]
#[command(about = "Inspect and maintain the lists used to reconcile page entries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List store directory (overrides storage.store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the lists stored for a site and user
    Lists {
        site: String,
        user: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print one list as JSON
    Show {
        site: String,
        user: String,
        list: String,
    },
    /// Replace a list with the JSON object (id -> name) in a file
    Import {
        site: String,
        user: String,
        list: String,
        file: PathBuf,
    },
    /// Delete one list
    Delete {
        site: String,
        user: String,
        list: String,
    },
    /// Delete every list of a site and user
    Clear { site: String, user: String },
    /// Show the last user remembered for a site
    User { site: String },
    /// Print the effective configuration as TOML
    Config,
}
