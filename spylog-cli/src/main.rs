//! spylog -- derive TODO/FIXME scan patterns from build spy logs.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod scanner;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use spylog_core::config::SpylogConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging needs the [general] section before any command runs.
    // Broken config files are reported by the command itself.
    let mut general = SpylogConfig::load(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_default();
    if let Some(ref level) = cli.log_level {
        general.log_level = level.clone();
    }

    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("{} {e}", "warning:".yellow().bold());
    }
    spylog_core::metrics::describe_all();

    tracing::debug!(command = ?cli.command, "spylog starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Tasks(args) => commands::tasks::execute(args, &cli.config, &writer).await,
        Commands::Patterns(args) => commands::patterns::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
