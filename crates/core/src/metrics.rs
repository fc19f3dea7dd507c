//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않으면 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `spylog_`
//! - 모듈명: `tasks_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(spylog_core::metrics::TASKS_EVENTS_MATCHED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 건너뛴 사유 레이블 키 (missing_project, missing_build, ...)
pub const LABEL_REASON: &str = "reason";

/// 결과 레이블 키 (completed, failed)
pub const LABEL_RESULT: &str = "result";

// ─── Tasks Reporter 메트릭 ──────────────────────────────────────────

/// Tasks: 완료된 처리 실행 수 (counter)
pub const TASKS_RUNS_TOTAL: &str = "spylog_tasks_runs_total";

/// Tasks: 필터에 매칭된 실행 이벤트 수 (counter)
pub const TASKS_EVENTS_MATCHED_TOTAL: &str = "spylog_tasks_events_matched_total";

/// Tasks: 건너뛴 빌드 레코드 수 (counter, label: reason)
pub const TASKS_RECORDS_SKIPPED_TOTAL: &str = "spylog_tasks_records_skipped_total";

/// Tasks: 패턴에 포함된 소스 디렉토리 수 (counter)
pub const TASKS_DIRECTORIES_ACCEPTED_TOTAL: &str = "spylog_tasks_directories_accepted_total";

/// Tasks: 워크스페이스에 없어 제외된 소스 디렉토리 수 (counter)
pub const TASKS_DIRECTORIES_MISSING_TOTAL: &str = "spylog_tasks_directories_missing_total";

/// Tasks: 스캐너 호출 수 (counter, label: result)
pub const TASKS_DISPATCH_TOTAL: &str = "spylog_tasks_dispatch_total";

/// Tasks: 스캐너 호출 소요 시간 (histogram, 초)
pub const TASKS_DISPATCH_DURATION_SECONDS: &str = "spylog_tasks_dispatch_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 레코더가 설치된 뒤 호출하면 설명이 함께 노출됩니다. 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(TASKS_RUNS_TOTAL, "Total number of spy log processing runs");
    describe_counter!(
        TASKS_EVENTS_MATCHED_TOTAL,
        "Execution events matching the configured event types"
    );
    describe_counter!(
        TASKS_RECORDS_SKIPPED_TOTAL,
        "Build records skipped because the project or build node was unusable"
    );
    describe_counter!(
        TASKS_DIRECTORIES_ACCEPTED_TOTAL,
        "Source directories added to the task scan pattern"
    );
    describe_counter!(
        TASKS_DIRECTORIES_MISSING_TOTAL,
        "Source directories dropped because they do not exist in the workspace"
    );
    describe_counter!(TASKS_DISPATCH_TOTAL, "Task scanner invocations by result");
    describe_histogram!(
        TASKS_DISPATCH_DURATION_SECONDS,
        "Time spent in the external task scanner in seconds"
    );
}
