//! 태스크 리포터 설정
//!
//! [`TasksReporterConfig`]는 core의 [`TasksConfig`](spylog_core::config::TasksConfig)에서
//! 리포터가 실제로 쓰는 값만 골라 타입을 입힌 설정입니다.
//!
//! # 사용 예시
//!
//! ```
//! use spylog_tasks_reporter::{TasksReporterConfig, TasksReporterConfigBuilder};
//!
//! // 기본값으로 생성
//! let config = TasksReporterConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = TasksReporterConfigBuilder::new()
//!     .event_types(vec!["ProjectSucceeded".to_owned()])
//!     .dispatch_timeout_secs(60)
//!     .build()
//!     .unwrap();
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use spylog_core::config::{DEFAULT_EVENT_TYPES, TasksConfig};

use crate::error::TasksReporterError;

/// 설정 상한값 상수
const MAX_DISPATCH_TIMEOUT_SECS: u64 = 86_400; // 24 hours
const MAX_LOG_SIZE: usize = 1024 * 1024 * 1024; // 1 GB

/// 태스크 리포터 설정
///
/// # 필드
///
/// - **event_types**: 처리할 `ExecutionEvent`의 `type` 값
/// - **dispatch_timeout_secs**: 외부 스캐너 호출 제한 시간
/// - **max_log_size**: 스파이 로그 최대 크기 (바이트)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksReporterConfig {
    /// 처리할 실행 이벤트 타입
    pub event_types: Vec<String>,
    /// 스캐너 호출 제한 시간 (초)
    pub dispatch_timeout_secs: u64,
    /// 스파이 로그 최대 크기 (바이트)
    pub max_log_size: usize,
}

impl Default for TasksReporterConfig {
    fn default() -> Self {
        Self {
            event_types: DEFAULT_EVENT_TYPES.iter().map(|t| (*t).to_owned()).collect(),
            dispatch_timeout_secs: 300,
            max_log_size: 64 * 1024 * 1024, // 64 MB
        }
    }
}

impl TasksReporterConfig {
    /// core의 `TasksConfig`에서 리포터 설정을 생성합니다.
    pub fn from_core(core: &TasksConfig) -> Self {
        Self {
            event_types: core.event_types.clone(),
            dispatch_timeout_secs: core.dispatch_timeout_secs,
            max_log_size: core.max_log_size,
        }
    }

    /// 스캐너 호출 제한 시간
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `event_types`: 하나 이상, 빈 문자열 불가
    /// - `dispatch_timeout_secs`: 1-86400
    /// - `max_log_size`: 1-1073741824 (1GB)
    pub fn validate(&self) -> Result<(), TasksReporterError> {
        if self.event_types.is_empty() {
            return Err(TasksReporterError::Config {
                field: "event_types".to_owned(),
                reason: "at least one event type required".to_owned(),
            });
        }

        if self.event_types.iter().any(|t| t.trim().is_empty()) {
            return Err(TasksReporterError::Config {
                field: "event_types".to_owned(),
                reason: "event type must not be empty".to_owned(),
            });
        }

        if self.dispatch_timeout_secs == 0 || self.dispatch_timeout_secs > MAX_DISPATCH_TIMEOUT_SECS
        {
            return Err(TasksReporterError::Config {
                field: "dispatch_timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_DISPATCH_TIMEOUT_SECS}"),
            });
        }

        if self.max_log_size == 0 || self.max_log_size > MAX_LOG_SIZE {
            return Err(TasksReporterError::Config {
                field: "max_log_size".to_owned(),
                reason: format!("must be 1-{MAX_LOG_SIZE}"),
            });
        }

        Ok(())
    }
}

/// [`TasksReporterConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct TasksReporterConfigBuilder {
    config: TasksReporterConfig,
}

impl TasksReporterConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 처리할 이벤트 타입을 설정합니다.
    pub fn event_types(mut self, event_types: Vec<String>) -> Self {
        self.config.event_types = event_types;
        self
    }

    /// 스캐너 호출 제한 시간을 설정합니다.
    pub fn dispatch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.dispatch_timeout_secs = secs;
        self
    }

    /// 스파이 로그 최대 크기를 설정합니다.
    pub fn max_log_size(mut self, size: usize) -> Self {
        self.config.max_log_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<TasksReporterConfig, TasksReporterError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
