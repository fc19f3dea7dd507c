//! 스캔 디스패처 - 외부 태스크 스캐너 호출
//!
//! [`TaskScanner`]는 glob 패턴과 마커 정책을 받아 실제 파일 내용을 스캔하는
//! 외부 협력자입니다. [`dispatch`]는 스캐너를 제한 시간 안에 호출하고,
//! 실패나 시간 초과를 리스너 에러 메시지와 `warn!` 로그로 바꿉니다.
//! 스캐너 실패는 처리 실행을 중단시키지 않습니다.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{info, warn};

use spylog_core::listener::TaskListener;
use spylog_core::metrics as m;
use spylog_core::types::TaskMarkers;

use crate::error::ScanError;

/// 스캐너에 전달하는 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskScanRequest {
    /// 쉼표로 이어 붙인 glob 패턴 (빈 문자열이면 스캔 대상 없음)
    pub pattern: String,
    /// 마커 → 우선순위 정책
    pub markers: TaskMarkers,
    /// 스캔 기준 디렉토리
    pub workspace_root: PathBuf,
}

impl TaskScanRequest {
    /// 기본 마커 정책으로 요청을 생성합니다.
    pub fn new(pattern: impl Into<String>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            pattern: pattern.into(),
            markers: TaskMarkers::policy(),
            workspace_root: workspace_root.into(),
        }
    }
}

/// 외부 태스크 스캐너
///
/// # 구현 예시
/// ```ignore
/// struct NoopScanner;
///
/// impl TaskScanner for NoopScanner {
///     fn name(&self) -> &str { "noop" }
///
///     async fn perform(
///         &self,
///         request: &TaskScanRequest,
///         listener: &mut dyn TaskListener,
///     ) -> Result<(), ScanError> {
///         listener.info(&format!("would scan {}", request.pattern));
///         Ok(())
///     }
/// }
/// ```
pub trait TaskScanner: Send + Sync {
    /// 스캐너 이름 (로그용)
    fn name(&self) -> &str;

    /// 주어진 패턴과 마커 정책으로 스캔을 수행합니다.
    fn perform(
        &self,
        request: &TaskScanRequest,
        listener: &mut dyn TaskListener,
    ) -> impl Future<Output = Result<(), ScanError>> + Send;
}

/// 스캐너 호출 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// 스캐너가 정상 종료
    Completed,
    /// 스캐너 실패 또는 시간 초과 (경고로 처리됨)
    Failed { pattern: String, reason: String },
}

impl DispatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    fn as_label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// 스캐너를 호출합니다. 실패는 전파되지 않습니다.
pub async fn dispatch<S: TaskScanner>(
    scanner: &S,
    request: &TaskScanRequest,
    listener: &mut dyn TaskListener,
    timeout: Duration,
) -> DispatchOutcome {
    info!(
        scanner = scanner.name(),
        pattern = %request.pattern,
        markers = %request.markers,
        "dispatching task scan"
    );

    let started = Instant::now();
    let result = match tokio::time::timeout(timeout, scanner.perform(request, &mut *listener)).await
    {
        Ok(result) => result,
        Err(_) => Err(ScanError::Timeout(timeout)),
    };
    histogram!(m::TASKS_DISPATCH_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

    let outcome = match result {
        Ok(()) => DispatchOutcome::Completed,
        Err(e) => {
            warn!(
                scanner = scanner.name(),
                pattern = %request.pattern,
                error = %e,
                "task scan failed"
            );
            listener.error(&format!(
                "Failed to scan tasks with pattern '{}': {e}",
                request.pattern
            ));
            DispatchOutcome::Failed {
                pattern: request.pattern.clone(),
                reason: e.to_string(),
            }
        }
    };

    counter!(m::TASKS_DISPATCH_TOTAL, m::LABEL_RESULT => outcome.as_label()).increment(1);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use spylog_core::listener::{ListenerLevel, MemoryListener};

    struct RecordingScanner {
        fail: bool,
    }

    impl TaskScanner for RecordingScanner {
        fn name(&self) -> &str {
            "recording"
        }

        async fn perform(
            &self,
            request: &TaskScanRequest,
            listener: &mut dyn TaskListener,
        ) -> Result<(), ScanError> {
            listener.info(&format!("scanning {}", request.pattern));
            if self.fail {
                Err(ScanError::Internal("disk on fire".to_owned()))
            } else {
                Ok(())
            }
        }
    }

    struct SleepyScanner;

    impl TaskScanner for SleepyScanner {
        fn name(&self) -> &str {
            "sleepy"
        }

        async fn perform(
            &self,
            _request: &TaskScanRequest,
            _listener: &mut dyn TaskListener,
        ) -> Result<(), ScanError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn successful_scan_completes() {
        let mut listener = MemoryListener::new();
        let request = TaskScanRequest::new("src/**/*", "/ws");
        let outcome = dispatch(
            &RecordingScanner { fail: false },
            &request,
            &mut listener,
            Duration::from_secs(5),
        )
        .await;

        assert!(outcome.is_completed());
        assert_eq!(listener.messages(ListenerLevel::Info), vec!["scanning src/**/*"]);
        assert!(listener.messages(ListenerLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn scanner_error_becomes_listener_error() {
        let mut listener = MemoryListener::new();
        let request = TaskScanRequest::new("a/**/*,b/**/*", "/ws");
        let outcome = dispatch(
            &RecordingScanner { fail: true },
            &request,
            &mut listener,
            Duration::from_secs(5),
        )
        .await;

        match &outcome {
            DispatchOutcome::Failed { pattern, reason } => {
                assert_eq!(pattern, "a/**/*,b/**/*");
                assert!(reason.contains("disk on fire"));
            }
            DispatchOutcome::Completed => panic!("expected failure"),
        }
        let errors = listener.messages(ListenerLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("a/**/*,b/**/*"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_a_failure() {
        let mut listener = MemoryListener::new();
        let request = TaskScanRequest::new("src/**/*", "/ws");
        let outcome = dispatch(&SleepyScanner, &request, &mut listener, Duration::from_secs(1)).await;

        match outcome {
            DispatchOutcome::Failed { reason, .. } => assert!(reason.contains("timed out")),
            DispatchOutcome::Completed => panic!("expected timeout"),
        }
        assert_eq!(listener.messages(ListenerLevel::Error).len(), 1);
    }

    #[test]
    fn request_uses_fixed_marker_policy() {
        let request = TaskScanRequest::new("", "/ws");
        assert_eq!(request.markers, TaskMarkers::policy());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_string(&DispatchOutcome::Completed).unwrap();
        assert_eq!(json, r#"{"status":"completed"}"#);

        let failed = DispatchOutcome::Failed {
            pattern: "p".to_owned(),
            reason: "r".to_owned(),
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["pattern"], "p");
    }
}
