//! 스캔 패턴 집계기
//!
//! 존재가 확인된 상대 경로를 `rel/**/*` glob으로 바꾸고 쉼표로 이어 붙입니다.
//! 빈 패턴은 "아무것도 스캔하지 않음"을 뜻합니다.

use std::fmt;

use serde::Serialize;

use crate::resolver::ResolvedSourcePath;

/// 디렉토리 하위 전체를 가리키는 glob 접미어
///
/// 상대 경로는 플랫폼 구분자를 그대로 유지하고 접미어는 항상 `/`를 씁니다.
/// Windows에서는 `src\main\java/**/*`처럼 구분자가 섞이며, 스캐너는 두 구분자를 모두 받습니다.
pub const GLOB_SUFFIX: &str = "/**/*";

/// 워크스페이스 루트 자체를 가리키는 glob
pub const WORKSPACE_GLOB: &str = "**/*";

/// 패턴 구분자
pub const PATTERN_SEPARATOR: &str = ",";

/// 삽입 순서를 유지하는 glob 패턴 목록
///
/// 중복은 제거하지 않습니다 (스캐너가 집합으로 취급).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatternSet {
    patterns: Vec<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 상대 디렉토리 경로를 glob으로 바꿔 추가합니다.
    pub fn push_directory(&mut self, relative_path: &str) {
        let pattern = if relative_path.is_empty() {
            WORKSPACE_GLOB.to_owned()
        } else {
            format!("{relative_path}{GLOB_SUFFIX}")
        };
        self.patterns.push(pattern);
    }

    /// 워크스페이스에 존재하는 경로만 골라 패턴 목록을 만듭니다.
    pub fn from_resolved<'a>(paths: impl IntoIterator<Item = &'a ResolvedSourcePath>) -> Self {
        let mut set = Self::new();
        for path in paths.into_iter().filter(|p| p.exists_in_workspace) {
            set.push_directory(&path.relative_path);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// 쉼표로 이어 붙인 패턴 문자열
    pub fn to_pattern(&self) -> String {
        self.patterns.join(PATTERN_SEPARATOR)
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pattern())
    }
}

/// `(상대 경로, 존재 여부)` 목록을 패턴 문자열로 집계합니다.
///
/// 존재하지 않는 항목은 버리고 입력 순서를 유지합니다.
pub fn aggregate<I, P>(entries: I) -> String
where
    I: IntoIterator<Item = (P, bool)>,
    P: AsRef<str>,
{
    let mut set = PatternSet::new();
    for (relative_path, exists) in entries {
        if exists {
            set.push_directory(relative_path.as_ref());
        }
    }
    set.to_pattern()
}
