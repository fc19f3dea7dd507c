//! CLI-specific error types and exit code mapping

use spylog_core::error::{SpylogError, TasksError};
use spylog_tasks_reporter::TasksReporterError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Spy log or workspace could not be used.
    #[error("input error: {0}")]
    Input(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from spylog-core.
    #[error("{0}")]
    Core(#[from] SpylogError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success (scanner failures included)  |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 3    | Unusable spy log or workspace        |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Input(_) => 3,
            Self::Io(_) => 10,
            Self::Core(core) => match core {
                SpylogError::Config(_) => 2,
                SpylogError::Parse(_) | SpylogError::Tasks(TasksError::SpyLogUnavailable(_)) => 3,
                SpylogError::Io(_) => 10,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<TasksReporterError> for CliError {
    fn from(e: TasksReporterError) -> Self {
        Self::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spylog_core::error::{ConfigError, ParseError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_input_error() {
        let err = CliError::Input("workspace not found".to_owned());
        assert_eq!(err.exit_code(), 3, "input error should return exit code 3");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::Core(SpylogError::Config(ConfigError::FileNotFound {
            path: "spylog.toml".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_core_parse_error() {
        let err = CliError::Core(SpylogError::Parse(ParseError::TooLarge { size: 2, max: 1 }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_from_tasks_reporter_parse_error() {
        let err: CliError = TasksReporterError::SpyLogParse {
            position: "3:7".to_owned(),
            reason: "unexpected end of stream".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("3:7"));
    }

    #[test]
    fn test_from_tasks_reporter_read_error() {
        let err: CliError = TasksReporterError::SpyLogRead {
            path: "missing.log".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("missing.log"));
    }

    #[test]
    fn test_from_tasks_reporter_config_error() {
        let err: CliError = TasksReporterError::Config {
            field: "dispatch_timeout_secs".to_owned(),
            reason: "must be 1-86400".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = format!("{}", err);
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let cli_err: CliError = io_err.into();
        match cli_err {
            CliError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("expected Io error variant"),
        }
    }
}
