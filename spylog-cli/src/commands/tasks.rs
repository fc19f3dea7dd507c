//! `spylog tasks` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use spylog_core::listener::StreamListener;
use spylog_core::workspace::LocalWorkspace;
use spylog_tasks_reporter::{DispatchOutcome, ProcessReport, TasksReporter, TasksReporterConfig};

use crate::cli::TasksArgs;
use crate::commands::{load_config, open_workspace, read_spy_log};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::scanner::CommandTaskScanner;

/// Execute the `tasks` command.
///
/// Scanner failures are reported but do not change the exit code.
pub async fn execute(
    args: TasksArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = load_config(config_path).await?;
    if let Some(scanner) = args.scanner {
        config.tasks.scanner_command = scanner;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.tasks.dispatch_timeout_secs = timeout_secs;
    }

    if !config.tasks.enabled {
        info!("task scanning disabled by configuration");
        writer.render(&TasksDisabled {
            enabled: false,
            reason: "tasks.enabled = false".to_owned(),
        })?;
        return Ok(());
    }

    let reporter_config = TasksReporterConfig::from_core(&config.tasks);
    reporter_config.validate()?;

    // Without a scanner the spy log is never parsed, so it is not read either
    let scanner = CommandTaskScanner::probe(&config.tasks);
    let (workspace, spy_log) = match &scanner {
        Some(scanner) => {
            info!(program = %scanner.program().display(), "task scanner resolved");
            (
                open_workspace(&args.workspace).await?,
                read_spy_log(&args.spy_log).await?,
            )
        }
        None => (LocalWorkspace::new(&args.workspace), String::new()),
    };
    let reporter = TasksReporter::new(reporter_config, scanner);

    info!(
        spy_log = %args.spy_log.display(),
        scanner_available = reporter.scanner_available(),
        "processing spy log"
    );

    // Build log lines go to stderr, the report to stdout
    let mut listener = StreamListener::stderr();
    let report = reporter
        .process(&spy_log, &workspace, Some(&mut listener))
        .await;

    writer.render(&report)?;
    Ok(())
}

/// Output when task scanning is switched off.
#[derive(Serialize)]
pub struct TasksDisabled {
    pub enabled: bool,
    pub reason: String,
}

impl Render for TasksDisabled {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Task scanning {} ({})", "disabled".yellow(), self.reason)
    }
}

impl Render for ProcessReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Run: {}", self.run_id.bold())?;

        if !self.scanner_available {
            writeln!(w, "Scanner: {}", "not available".yellow())?;
            return Ok(());
        }
        writeln!(w, "Scanner: {}", "available".green())?;

        if let Some(ref err) = self.input_error {
            writeln!(w, "Spy log: {}", err.red())?;
            return Ok(());
        }

        writeln!(
            w,
            "Events matched: {} (skipped: {})",
            self.events_matched, self.records_skipped
        )?;

        if !self.directories.is_empty() {
            writeln!(w)?;
            writeln!(w, "{:<9} {:<40} Project", "Status", "Source directory")?;
            writeln!(w, "{}", "-".repeat(80))?;
            for dir in &self.directories {
                let status = if dir.resolved.exists_in_workspace {
                    "scan".green()
                } else {
                    "missing".dimmed()
                };
                let path = if dir.resolved.relative_path.is_empty() {
                    "."
                } else {
                    dir.resolved.relative_path.as_str()
                };
                writeln!(w, "{:<9} {:<40} {}", status, path, dir.project)?;
            }
            writeln!(w)?;
        }

        if self.pattern.is_empty() {
            writeln!(w, "Pattern: {}", "(empty)".dimmed())?;
        } else {
            writeln!(w, "Pattern: {}", self.pattern.bold())?;
        }

        match &self.dispatch {
            Some(DispatchOutcome::Completed) => {
                writeln!(w, "Dispatch: {}", "completed".green())?;
            }
            Some(DispatchOutcome::Failed { reason, .. }) => {
                writeln!(w, "Dispatch: {} ({})", "failed".red().bold(), reason)?;
            }
            None => {
                writeln!(w, "Dispatch: {}", "skipped".dimmed())?;
            }
        }

        Ok(())
    }
}
