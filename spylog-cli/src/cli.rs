//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "spylog.toml";

/// spylog -- derive TODO/FIXME scan patterns from build spy logs.
///
/// Use `spylog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "spylog", version, about, long_about = None)]
pub struct Cli {
    /// Path to the spylog.toml configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a spy log and hand the source directories to the task scanner.
    Tasks(TasksArgs),

    /// Print the scan pattern derived from a spy log without running the scanner.
    Patterns(PatternsArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- tasks ----

/// Process a spy log and dispatch the task scanner.
#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Path to the build spy log (XML).
    pub spy_log: PathBuf,

    /// Workspace root the recorded source directories are resolved against.
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Override the task scanner executable (`tasks.scanner_command`).
    #[arg(long)]
    pub scanner: Option<String>,

    /// Override the scanner timeout in seconds (`tasks.dispatch_timeout_secs`).
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

// ---- patterns ----

/// Derive the scan pattern from a spy log.
#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Path to the build spy log (XML).
    pub spy_log: PathBuf,

    /// Workspace root the recorded source directories are resolved against.
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,
}

// ---- config ----

/// Manage spylog configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, tasks).
        #[arg(long)]
        section: Option<String>,
    },
}
