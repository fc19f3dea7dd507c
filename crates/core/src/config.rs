//! 설정 관리 - spylog.toml 파싱 및 런타임 설정
//!
//! [`SpylogConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SPYLOG_TASKS_SCANNER_COMMAND=tasks-scan` 형식)
//! 3. 설정 파일 (`spylog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), spylog_core::error::SpylogError> {
//! use spylog_core::config::SpylogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SpylogConfig::load("spylog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SpylogConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, SpylogError};

/// 기본으로 처리하는 실행 이벤트 타입
pub const DEFAULT_EVENT_TYPES: [&str; 2] = ["ProjectSucceeded", "ProjectFailed"];

/// spylog 통합 설정
///
/// `spylog.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpylogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 태스크 스캔 설정
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl SpylogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SpylogError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SpylogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpylogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SpylogError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SpylogError> {
        toml::from_str(toml_str).map_err(|e| {
            SpylogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SPYLOG_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "SPYLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SPYLOG_GENERAL_LOG_FORMAT");

        override_bool(&mut self.tasks.enabled, "SPYLOG_TASKS_ENABLED");
        override_csv(&mut self.tasks.event_types, "SPYLOG_TASKS_EVENT_TYPES");
        override_string(
            &mut self.tasks.scanner_command,
            "SPYLOG_TASKS_SCANNER_COMMAND",
        );
        override_csv(&mut self.tasks.scanner_args, "SPYLOG_TASKS_SCANNER_ARGS");
        override_u64(
            &mut self.tasks.dispatch_timeout_secs,
            "SPYLOG_TASKS_DISPATCH_TIMEOUT_SECS",
        );
        override_usize(&mut self.tasks.max_log_size, "SPYLOG_TASKS_MAX_LOG_SIZE");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SpylogError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.tasks.enabled {
            if self.tasks.event_types.is_empty()
                || self.tasks.event_types.iter().any(|t| t.trim().is_empty())
            {
                return Err(ConfigError::InvalidValue {
                    field: "tasks.event_types".to_owned(),
                    reason: "at least one non-empty event type required".to_owned(),
                }
                .into());
            }

            if self.tasks.dispatch_timeout_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "tasks.dispatch_timeout_secs".to_owned(),
                    reason: "must be greater than 0".to_owned(),
                }
                .into());
            }

            if self.tasks.max_log_size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "tasks.max_log_size".to_owned(),
                    reason: "must be greater than 0".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 태스크 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// 처리할 실행 이벤트 타입
    pub event_types: Vec<String>,
    /// 외부 태스크 스캐너 실행 파일 (비어 있으면 스캐너 없음으로 간주)
    pub scanner_command: String,
    /// 스캐너에 항상 전달할 추가 인자
    pub scanner_args: Vec<String>,
    /// 스캐너 호출 제한 시간 (초)
    pub dispatch_timeout_secs: u64,
    /// 스파이 로그 최대 크기 (바이트)
    pub max_log_size: usize,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            event_types: DEFAULT_EVENT_TYPES.iter().map(|t| (*t).to_owned()).collect(),
            scanner_command: String::new(),
            scanner_args: Vec::new(),
            dispatch_timeout_secs: 300,
            max_log_size: 64 * 1024 * 1024, // 64 MB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = SpylogConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert!(config.tasks.enabled);
        assert_eq!(
            config.tasks.event_types,
            vec!["ProjectSucceeded", "ProjectFailed"]
        );
        assert!(config.tasks.scanner_command.is_empty());
    }

    #[test]
    fn default_config_passes_validation() {
        SpylogConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = SpylogConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.tasks.dispatch_timeout_secs, 300);
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[tasks]
scanner_command = "/opt/tasks/bin/tasks-scan"
dispatch_timeout_secs = 30
"#;
        let config = SpylogConfig::parse(toml).unwrap();
        assert_eq!(config.tasks.scanner_command, "/opt/tasks/bin/tasks-scan");
        assert_eq!(config.tasks.dispatch_timeout_secs, 30);
        // event_types는 기본값 유지
        assert_eq!(config.tasks.event_types.len(), 2);
        assert_eq!(config.general.log_format, "pretty");
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = SpylogConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            SpylogError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = SpylogConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = SpylogConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_empty_event_types_when_enabled() {
        let mut config = SpylogConfig::default();
        config.tasks.event_types.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("event_types"));
    }

    #[test]
    fn validate_accepts_empty_event_types_when_disabled() {
        let mut config = SpylogConfig::default();
        config.tasks.enabled = false;
        config.tasks.event_types.clear();
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = SpylogConfig::default();
        config.tasks.dispatch_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dispatch_timeout_secs"));
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되어 다른 스레드가 환경변수를 읽지 않습니다.
        unsafe { std::env::set_var("TEST_SPYLOG_STR", "overridden") };
        override_string(&mut val, "TEST_SPYLOG_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_SPYLOG_STR") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = true;
        // SAFETY: serial 테스트로 실행되어 다른 스레드가 환경변수를 읽지 않습니다.
        unsafe { std::env::set_var("TEST_SPYLOG_BOOL_BAD", "nope") };
        override_bool(&mut val, "TEST_SPYLOG_BOOL_BAD");
        assert!(val);
        unsafe { std::env::remove_var("TEST_SPYLOG_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn env_override_csv_drops_blank_entries() {
        let mut val = vec!["ProjectSucceeded".to_owned()];
        // SAFETY: serial 테스트로 실행되어 다른 스레드가 환경변수를 읽지 않습니다.
        unsafe { std::env::set_var("TEST_SPYLOG_CSV", "ProjectFailed, ,ProjectSkipped") };
        override_csv(&mut val, "TEST_SPYLOG_CSV");
        assert_eq!(val, vec!["ProjectFailed", "ProjectSkipped"]);
        unsafe { std::env::remove_var("TEST_SPYLOG_CSV") };
    }

    #[test]
    #[serial]
    fn env_override_u64_invalid_keeps_original() {
        let mut val = 300;
        // SAFETY: serial 테스트로 실행되어 다른 스레드가 환경변수를 읽지 않습니다.
        unsafe { std::env::set_var("TEST_SPYLOG_U64_BAD", "soon") };
        override_u64(&mut val, "TEST_SPYLOG_U64_BAD");
        assert_eq!(val, 300);
        unsafe { std::env::remove_var("TEST_SPYLOG_U64_BAD") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = 7usize;
        override_usize(&mut val, "TEST_SPYLOG_NONEXISTENT_12345");
        assert_eq!(val, 7);
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = SpylogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = SpylogConfig::parse(&toml_str).unwrap();
        assert_eq!(config.tasks.event_types, parsed.tasks.event_types);
        assert_eq!(config.tasks.max_log_size, parsed.tasks.max_log_size);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = SpylogConfig::from_file("/nonexistent/path/spylog.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SpylogError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
