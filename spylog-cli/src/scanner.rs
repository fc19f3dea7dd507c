//! Command-backed task scanner
//!
//! Runs an external executable in the workspace root:
//!
//! ```text
//! <scanner_command> <scanner_args...> --pattern <glob,glob> --high FIXME --normal TODO
//! ```
//!
//! Each stdout line is forwarded to the task listener. A non-zero exit status is a
//! scan failure; the dispatcher turns it into a warning.

use std::path::{Path, PathBuf};

use tracing::debug;

use spylog_core::config::TasksConfig;
use spylog_core::listener::TaskListener;
use spylog_core::types::TaskPriority;
use spylog_tasks_reporter::{ScanError, TaskScanRequest, TaskScanner};

/// Task scanner that spawns an external process.
#[derive(Debug, Clone)]
pub struct CommandTaskScanner {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandTaskScanner {
    /// Resolve the configured scanner command.
    ///
    /// Returns `None` when no command is configured or the executable cannot be found,
    /// which the reporter treats as "scanner not installed".
    pub fn probe(config: &TasksConfig) -> Option<Self> {
        let command = config.scanner_command.trim();
        if command.is_empty() {
            debug!("no task scanner configured");
            return None;
        }

        match find_executable(command) {
            Some(program) => {
                debug!(program = %program.display(), "task scanner found");
                Some(Self {
                    program,
                    args: config.scanner_args.clone(),
                })
            }
            None => {
                debug!(command, "task scanner not found");
                None
            }
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument list for one scan request.
    pub fn command_args(&self, request: &TaskScanRequest) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("--pattern".to_owned());
        args.push(request.pattern.clone());

        for priority in [TaskPriority::High, TaskPriority::Normal, TaskPriority::Low] {
            let markers = request.markers.markers(priority);
            if !markers.is_empty() {
                args.push(format!("--{}", priority.as_str()));
                args.push(markers.join(","));
            }
        }
        args
    }
}

impl TaskScanner for CommandTaskScanner {
    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("task-scanner")
    }

    async fn perform(
        &self,
        request: &TaskScanRequest,
        listener: &mut dyn TaskListener,
    ) -> Result<(), ScanError> {
        let args = self.command_args(request);
        debug!(program = %self.program.display(), ?args, "spawning task scanner");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .current_dir(&request.workspace_root)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ScanError::Spawn {
                command: self.program.display().to_string(),
                reason: e.to_string(),
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            if !line.trim().is_empty() {
                listener.info(line);
            }
        }

        if !output.status.success() {
            return Err(ScanError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(())
    }
}

/// Locate an executable by absolute/relative path or `PATH` lookup.
fn find_executable(command: &str) -> Option<PathBuf> {
    let path = Path::new(command);
    if path.is_absolute() || path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }

    let search_path = std::env::var_os("PATH")?;
    std::env::split_paths(&search_path).find_map(|dir| {
        let candidate = dir.join(command);
        if candidate.is_file() {
            return Some(candidate);
        }
        let ext = std::env::consts::EXE_EXTENSION;
        if ext.is_empty() {
            return None;
        }
        let candidate = candidate.with_extension(ext);
        candidate.is_file().then_some(candidate)
    })
}
