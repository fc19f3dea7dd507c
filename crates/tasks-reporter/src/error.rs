//! 태스크 리포터 에러 타입
//!
//! [`TasksReporterError`]는 스파이 로그를 읽고 파싱하는 단계에서 발생하는 에러입니다.
//! `From<TasksReporterError> for SpylogError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! [`ScanError`]는 외부 스캐너 경계에서만 쓰이며, [`dispatch`](crate::dispatch::dispatch)
//! 밖으로 전파되지 않고 경고로 바뀝니다.
//!
//! # 에러 카테고리
//!
//! - **스파이 로그**: `SpyLogRead`, `SpyLogParse`, `SpyLogTooLarge`
//! - **설정**: `Config`

use std::time::Duration;

use spylog_core::error::{ConfigError, ParseError, SpylogError, TasksError};

/// 태스크 리포터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum TasksReporterError {
    /// 스파이 로그 파일 읽기 실패
    #[error("spy log read error: {path}: {source}")]
    SpyLogRead {
        /// 스파이 로그 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 스파이 로그 XML 파싱 실패
    #[error("spy log parse error at {position}: {reason}")]
    SpyLogParse {
        /// 행:열 위치
        position: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 스파이 로그 크기 초과
    #[error("spy log too large: {size} bytes (max: {max})")]
    SpyLogTooLarge {
        /// 실제 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<TasksReporterError> for SpylogError {
    fn from(err: TasksReporterError) -> Self {
        match err {
            TasksReporterError::SpyLogRead { path, source } => SpylogError::Tasks(
                TasksError::SpyLogUnavailable(format!("{path}: {source}")),
            ),
            TasksReporterError::SpyLogParse { position, reason } => {
                SpylogError::Parse(ParseError::Malformed { position, reason })
            }
            TasksReporterError::SpyLogTooLarge { size, max } => {
                SpylogError::Parse(ParseError::TooLarge { size, max })
            }
            TasksReporterError::Config { field, reason } => {
                SpylogError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

/// 외부 태스크 스캐너 실행 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 스캐너 프로세스를 시작하지 못함
    #[error("failed to start scanner '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// 스캐너가 실패 상태로 종료
    #[error("scanner exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    /// 제한 시간 초과
    #[error("scanner timed out after {0:?}")]
    Timeout(Duration),

    /// 기타 스캐너 내부 에러
    #[error("{0}")]
    Internal(String),
}
