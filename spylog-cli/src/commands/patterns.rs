//! `spylog patterns` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use spylog_core::workspace::Workspace;
use spylog_tasks_reporter::{
    CollectedDirectory, SpyLog, TasksReporter, TasksReporterConfig,
};

use crate::cli::PatternsArgs;
use crate::commands::{load_config, open_workspace, read_spy_log};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::scanner::CommandTaskScanner;

/// Execute the `patterns` command.
///
/// Unlike `tasks`, an unreadable or malformed spy log is an error here.
pub async fn execute(
    args: PatternsArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_config(config_path).await?;
    let reporter_config = TasksReporterConfig::from_core(&config.tasks);
    reporter_config.validate()?;

    let workspace = open_workspace(&args.workspace).await?;
    let xml = read_spy_log(&args.spy_log).await?;
    let spy_log = SpyLog::parse_with_limit(&xml, reporter_config.max_log_size)?;

    // Collection never dispatches, so no scanner is needed
    let reporter = TasksReporter::<CommandTaskScanner>::new(reporter_config, None);
    let collection = reporter.collect(&spy_log, &workspace);

    let report = PatternsReport {
        spy_log: args.spy_log.display().to_string(),
        workspace: workspace.root().display().to_string(),
        events_matched: collection.events_matched,
        records_skipped: collection.records_skipped,
        pattern: collection.pattern(),
        patterns: collection.pattern_set().iter().map(str::to_owned).collect(),
        directories: collection.directories,
    };

    info!(
        pattern = %report.pattern,
        directories = report.directories.len(),
        "scan pattern derived"
    );

    writer.render(&report)?;
    Ok(())
}

/// Pattern derivation report.
#[derive(Serialize)]
pub struct PatternsReport {
    pub spy_log: String,
    pub workspace: String,
    pub events_matched: usize,
    pub records_skipped: usize,
    /// Comma-joined pattern as handed to the scanner
    pub pattern: String,
    /// Individual globs in event order
    pub patterns: Vec<String>,
    pub directories: Vec<CollectedDirectory>,
}

impl Render for PatternsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Spy log: {}", self.spy_log.bold())?;
        writeln!(w, "Workspace: {}", self.workspace)?;
        writeln!(
            w,
            "Events matched: {} (skipped: {})",
            self.events_matched, self.records_skipped
        )?;
        writeln!(w)?;

        for dir in &self.directories {
            let marker = if dir.resolved.exists_in_workspace {
                "+".green()
            } else {
                "-".red()
            };
            writeln!(
                w,
                "{} {} <- {} [{}]",
                marker,
                dir.project,
                dir.source_directory,
                dir.strategy.as_str()
            )?;
        }

        if self.patterns.is_empty() {
            writeln!(w, "{}", "No source directories to scan.".yellow())?;
        } else {
            if !self.directories.is_empty() {
                writeln!(w)?;
            }
            for pattern in &self.patterns {
                writeln!(w, "{}", pattern)?;
            }
        }

        Ok(())
    }
}
