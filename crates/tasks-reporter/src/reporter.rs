//! 태스크 리포터 - 스파이 로그 처리 실행 오케스트레이터
//!
//! 한 번의 처리 실행은 다음 순서로 진행됩니다.
//!
//! ```text
//! 스캐너 확인 → 이벤트 추출 → 레코드 파싱 → 경로 해석 → 존재 확인 → 패턴 집계 → 디스패치
//! ```
//!
//! 스캐너가 없으면 스파이 로그를 파싱하지 않고 안내 메시지 하나만 남깁니다.
//! 처리 중 어떤 실패도 실행을 중단시키지 않으며, 결과는 [`ProcessReport`]로 돌려줍니다.

use metrics::counter;
use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use spylog_core::listener::{StreamListener, TaskListener};
use spylog_core::metrics as m;
use spylog_core::workspace::Workspace;

use crate::config::TasksReporterConfig;
use crate::dispatch::{DispatchOutcome, TaskScanRequest, TaskScanner, dispatch};
use crate::extractor::SpyLog;
use crate::pattern::PatternSet;
use crate::record::{ProjectIdentity, parse_build_record};
use crate::resolver::{MatchStrategy, ResolvedSourcePath, resolve};

/// 스캐너 안내 문서 주소
pub const SCANNER_DOCS_URL: &str = "https://wiki.jenkins-ci.org/display/JENKINS/Task+Scanner+Plugin";

/// 해석을 마친 프로젝트 소스 디렉토리
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedDirectory {
    pub project: ProjectIdentity,
    /// 스파이 로그에 기록된 원래 경로
    pub source_directory: String,
    pub strategy: MatchStrategy,
    #[serde(flatten)]
    pub resolved: ResolvedSourcePath,
}

/// 이벤트 수집 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collection {
    /// 타입 필터에 매칭된 이벤트 수
    pub events_matched: usize,
    /// 건너뛴 레코드 수
    pub records_skipped: usize,
    /// 이벤트 순서대로 해석된 디렉토리 (존재하지 않는 것 포함)
    pub directories: Vec<CollectedDirectory>,
}

impl Collection {
    /// 존재하는 디렉토리만으로 만든 패턴 목록
    pub fn pattern_set(&self) -> PatternSet {
        PatternSet::from_resolved(self.directories.iter().map(|d| &d.resolved))
    }

    /// 쉼표로 이어 붙인 패턴 문자열
    pub fn pattern(&self) -> String {
        self.pattern_set().to_pattern()
    }
}

/// 처리 실행 보고서
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    /// 실행 ID (UUID v4)
    pub run_id: String,
    /// 스캐너 사용 가능 여부
    pub scanner_available: bool,
    pub events_matched: usize,
    pub records_skipped: usize,
    pub directories: Vec<CollectedDirectory>,
    /// 스캐너에 전달한 패턴
    pub pattern: String,
    /// 디스패치 결과 (스캐너가 없거나 입력을 읽지 못하면 `None`)
    pub dispatch: Option<DispatchOutcome>,
    /// 스파이 로그를 파싱하지 못한 사유
    pub input_error: Option<String>,
}

impl ProcessReport {
    fn empty(run_id: String, scanner_available: bool) -> Self {
        Self {
            run_id,
            scanner_available,
            events_matched: 0,
            records_skipped: 0,
            directories: Vec::new(),
            pattern: String::new(),
            dispatch: None,
            input_error: None,
        }
    }
}

/// 스파이 로그 기반 태스크 스캔 리포터
///
/// 스캐너 사용 가능 여부는 호출자가 결정해 `Option`으로 주입합니다.
pub struct TasksReporter<S> {
    config: TasksReporterConfig,
    scanner: Option<S>,
}

impl<S: TaskScanner> TasksReporter<S> {
    pub fn new(config: TasksReporterConfig, scanner: Option<S>) -> Self {
        Self { config, scanner }
    }

    pub fn config(&self) -> &TasksReporterConfig {
        &self.config
    }

    pub fn scanner_available(&self) -> bool {
        self.scanner.is_some()
    }

    /// 스파이 로그에서 소스 디렉토리를 수집합니다.
    ///
    /// 리스너 출력과 디스패치가 없으므로 같은 입력에 대해 항상 같은 결과를 냅니다.
    pub fn collect(&self, spy_log: &SpyLog<'_>, workspace: &dyn Workspace) -> Collection {
        let root = workspace.root().to_string_lossy();
        let mut collection = Collection::default();

        for event in spy_log.execution_events(&self.config.event_types) {
            collection.events_matched += 1;

            let record = match parse_build_record(event) {
                Ok(record) => record,
                Err(reason) => {
                    collection.records_skipped += 1;
                    debug!(
                        reason = %reason,
                        event_type = event.attribute("type").unwrap_or_default(),
                        "ignoring execution event"
                    );
                    counter!(m::TASKS_RECORDS_SKIPPED_TOTAL, m::LABEL_REASON => reason.as_label())
                        .increment(1);
                    continue;
                }
            };

            let resolution = resolve(&record.build.source_directory, &root);
            let exists = workspace.exists(&resolution.relative_path);
            if exists {
                counter!(m::TASKS_DIRECTORIES_ACCEPTED_TOTAL).increment(1);
            } else {
                debug!(
                    project = %record.project,
                    path = %resolution.relative_path,
                    "skip task scanning, folder does not exist"
                );
                counter!(m::TASKS_DIRECTORIES_MISSING_TOTAL).increment(1);
            }

            collection.directories.push(CollectedDirectory {
                project: record.project,
                source_directory: record.build.source_directory,
                strategy: resolution.strategy,
                resolved: ResolvedSourcePath::new(resolution.relative_path, exists),
            });
        }

        counter!(m::TASKS_EVENTS_MATCHED_TOTAL).increment(collection.events_matched as u64);
        collection
    }

    /// 처리 실행 한 번을 수행합니다.
    ///
    /// `listener`가 `None`이면 stderr로 출력합니다.
    pub async fn process(
        &self,
        spy_log: &str,
        workspace: &dyn Workspace,
        listener: Option<&mut dyn TaskListener>,
    ) -> ProcessReport {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("tasks_run", run_id = %run_id);

        let mut fallback;
        let listener: &mut dyn TaskListener = match listener {
            Some(listener) => listener,
            None => {
                warn!("task listener unavailable, falling back to stderr");
                fallback = StreamListener::stderr();
                &mut fallback
            }
        };

        let report = self
            .run(run_id, spy_log, workspace, listener)
            .instrument(span)
            .await;
        counter!(m::TASKS_RUNS_TOTAL).increment(1);
        report
    }

    async fn run(
        &self,
        run_id: String,
        spy_log: &str,
        workspace: &dyn Workspace,
        listener: &mut dyn TaskListener,
    ) -> ProcessReport {
        let Some(scanner) = &self.scanner else {
            let link = listener.hyperlink(SCANNER_DOCS_URL, "Task Scanner");
            listener.info(&format!(
                "{link} not found, skip source code scanning for 'TODO' and 'FIXME'"
            ));
            info!("task scanner unavailable, spy log not processed");
            return ProcessReport::empty(run_id, false);
        };

        let mut report = ProcessReport::empty(run_id, true);

        let collection = match SpyLog::parse_with_limit(spy_log, self.config.max_log_size) {
            Ok(log) => self.collect(&log, workspace),
            Err(e) => {
                warn!(error = %e, "spy log unusable, skipping task scanning");
                listener.error(&format!("Skip task scanning: {e}"));
                report.input_error = Some(e.to_string());
                return report;
            }
        };

        for dir in collection.directories.iter().filter(|d| d.resolved.exists_in_workspace) {
            listener.info(&format!(
                "Scan tasks for {} in source directory {}",
                dir.project, dir.resolved.relative_path
            ));
        }

        let pattern = collection.pattern();
        info!(
            events = collection.events_matched,
            skipped = collection.records_skipped,
            directories = collection.directories.len(),
            pattern = %pattern,
            "spy log processed"
        );

        let request = TaskScanRequest::new(pattern.clone(), workspace.root());
        let outcome = dispatch(
            scanner,
            &request,
            listener,
            self.config.dispatch_timeout(),
        )
        .await;

        report.events_matched = collection.events_matched;
        report.records_skipped = collection.records_skipped;
        report.directories = collection.directories;
        report.pattern = pattern;
        report.dispatch = Some(outcome);
        report
    }
}
