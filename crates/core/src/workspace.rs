//! 워크스페이스 - 스캔 대상 파일시스템 추상화
//!
//! [`Workspace`]는 현재 실행 환경의 작업 디렉토리를 나타냅니다.
//! 로컬 디스크일 수도, 원격 에이전트일 수도 있으므로 trait으로 주입합니다.

use std::path::{Component, Path, PathBuf};

/// 상대 경로 존재 여부를 확인할 수 있는 워크스페이스
pub trait Workspace: Send + Sync {
    /// 워크스페이스 루트의 절대 경로
    fn root(&self) -> &Path;

    /// 루트 기준 상대 경로가 워크스페이스 안에 존재하는지 확인합니다.
    fn exists(&self, relative_path: &str) -> bool;
}

/// 로컬 디스크 워크스페이스
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
}

impl LocalWorkspace {
    /// 루트 경로로 워크스페이스를 생성합니다.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Workspace for LocalWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, relative_path: &str) -> bool {
        let relative = Path::new(relative_path);

        // 워크스페이스 밖을 가리키는 경로는 존재하지 않는 것으로 취급
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            tracing::debug!(path = relative_path, "path escapes workspace, treating as missing");
            return false;
        }

        self.root.join(relative).exists()
    }
}
