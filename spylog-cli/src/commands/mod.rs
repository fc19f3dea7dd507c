//! Command handlers -- one module per subcommand

pub mod config;
pub mod patterns;
pub mod tasks;

use std::path::{Path, PathBuf};

use tracing::debug;

use spylog_core::config::SpylogConfig;
use spylog_core::error::{ConfigError, SpylogError};
use spylog_core::workspace::LocalWorkspace;
use spylog_tasks_reporter::TasksReporterError;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Load the effective configuration.
///
/// A missing file at the default location falls back to defaults plus env overrides;
/// an explicitly given path must exist.
pub async fn load_config(config_path: &Path) -> Result<SpylogConfig, CliError> {
    match SpylogConfig::load(config_path).await {
        Ok(config) => Ok(config),
        Err(SpylogError::Config(ConfigError::FileNotFound { .. }))
            if config_path == Path::new(DEFAULT_CONFIG_PATH) =>
        {
            debug!(path = %config_path.display(), "config file not found, using defaults");
            let mut config = SpylogConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read a spy log file into memory.
pub async fn read_spy_log(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path).await.map_err(|source| {
        TasksReporterError::SpyLogRead {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Open the workspace root as an absolute path.
pub async fn open_workspace(path: &Path) -> Result<LocalWorkspace, CliError> {
    let root: PathBuf = tokio::fs::canonicalize(path)
        .await
        .map_err(|e| CliError::Input(format!("workspace {}: {}", path.display(), e)))?;
    if !root.is_dir() {
        return Err(CliError::Input(format!(
            "workspace {} is not a directory",
            root.display()
        )));
    }
    Ok(LocalWorkspace::new(root))
}
