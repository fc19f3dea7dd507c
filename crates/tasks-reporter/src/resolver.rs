//! 경로 해석기
//!
//! 다른 실행 환경(빌드 컨테이너, 원격 에이전트 등)에서 기록된 절대 소스 경로를
//! 현재 워크스페이스 루트 기준 상대 경로로 바꿉니다.
//!
//! # 해석 순서
//!
//! 1. 두 경로를 `/`와 `\` 기준으로 세그먼트 분할 (빈 세그먼트와 `.` 제거)
//! 2. macOS `/private/var` 심볼릭 링크 보정
//! 3. [`MatchStrategy::WorkspacePrefix`]: 루트가 소스 경로의 접두어
//! 4. [`MatchStrategy::SegmentSuffix`]: 루트의 마지막 k개 세그먼트가 소스 경로 안에
//!    세그먼트 단위로 나타나는 가장 왼쪽 위치 (k는 긴 것부터)
//! 5. [`MatchStrategy::Unmatched`]: 루트/드라이브를 뺀 정규화된 소스 경로
//!
//! 세그먼트 비교는 ASCII 대소문자를 구분하지 않습니다.
//! 해석은 실패하지 않으며, 사용 가능 여부는 호출자의 존재 확인이 결정합니다.

use std::path::MAIN_SEPARATOR_STR;

use serde::Serialize;

/// 상대 경로를 얻은 방법
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// 소스 경로가 워크스페이스 루트 아래에 있음
    WorkspacePrefix,
    /// 루트의 끝 세그먼트가 소스 경로 중간에서 발견됨
    SegmentSuffix,
    /// 공통 부분 없음
    Unmatched,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkspacePrefix => "workspace_prefix",
            Self::SegmentSuffix => "segment_suffix",
            Self::Unmatched => "unmatched",
        }
    }
}

/// 경로 해석 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// 워크스페이스 기준 상대 경로 (루트 자신이면 빈 문자열)
    pub relative_path: String,
    pub strategy: MatchStrategy,
}

/// 해석과 존재 확인을 마친 소스 경로
///
/// 실행마다 새로 계산되며 캐시되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSourcePath {
    pub relative_path: String,
    pub exists_in_workspace: bool,
}

impl ResolvedSourcePath {
    pub fn new(relative_path: impl Into<String>, exists_in_workspace: bool) -> Self {
        Self {
            relative_path: relative_path.into(),
            exists_in_workspace,
        }
    }
}

/// 절대 소스 경로를 워크스페이스 기준 상대 경로로 해석합니다.
pub fn resolve_relative_path(absolute_source_dir: &str, workspace_root: &str) -> String {
    resolve(absolute_source_dir, workspace_root).relative_path
}

/// 절대 소스 경로를 해석하고 사용한 전략을 함께 반환합니다.
pub fn resolve(absolute_source_dir: &str, workspace_root: &str) -> Resolution {
    let root = segments(workspace_root);
    let source = segments(absolute_source_dir);
    let source = strip_private_prefix(&source, &root);

    if let Some(tail) = strip_segment_prefix(source, &root) {
        return Resolution {
            relative_path: join(tail),
            strategy: MatchStrategy::WorkspacePrefix,
        };
    }

    if let Some(tail) = match_root_suffix(source, &root) {
        return Resolution {
            relative_path: join(tail),
            strategy: MatchStrategy::SegmentSuffix,
        };
    }

    Resolution {
        relative_path: join(strip_drive(source)),
        strategy: MatchStrategy::Unmatched,
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

fn segment_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn run_eq(haystack: &[&str], needle: &[&str]) -> bool {
    haystack.len() == needle.len()
        && haystack
            .iter()
            .zip(needle)
            .all(|(a, b)| segment_eq(a, b))
}

/// macOS에서 `/var`는 `/private/var`의 링크이므로, 루트가 `/var/...`이고
/// 소스가 `/private/var/...`이면 `private`를 제거합니다.
fn strip_private_prefix<'s, 'p>(source: &'s [&'p str], root: &[&str]) -> &'s [&'p str] {
    let root_in_var = root.first().is_some_and(|s| segment_eq(s, "var"));
    let source_in_private_var = source.len() >= 2
        && segment_eq(source[0], "private")
        && segment_eq(source[1], "var");

    if root_in_var && source_in_private_var {
        &source[1..]
    } else {
        source
    }
}

fn strip_segment_prefix<'s, 'p>(source: &'s [&'p str], root: &[&str]) -> Option<&'s [&'p str]> {
    if source.len() < root.len() {
        return None;
    }
    let (head, tail) = source.split_at(root.len());
    run_eq(head, root).then_some(tail)
}

fn match_root_suffix<'s, 'p>(source: &'s [&'p str], root: &[&str]) -> Option<&'s [&'p str]> {
    for k in (1..=root.len()).rev() {
        let needle = &root[root.len() - k..];
        if let Some(start) = source.windows(k).position(|w| run_eq(w, needle)) {
            return Some(&source[start + k..]);
        }
    }
    None
}

/// `C:` 같은 드라이브 세그먼트를 제거합니다.
fn strip_drive<'s, 'p>(source: &'s [&'p str]) -> &'s [&'p str] {
    match source.first() {
        Some(first) if is_drive(first) => &source[1..],
        _ => source,
    }
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn join(segments: &[&str]) -> String {
    segments.join(MAIN_SEPARATOR_STR)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `/` 구분 경로를 플랫폼 구분자로 변환
    fn native(path: &str) -> String {
        path.replace('/', MAIN_SEPARATOR_STR)
    }

    #[test]
    fn source_under_workspace_uses_prefix() {
        let res = resolve("/workspace/app/src/main/java", "/workspace/app");
        assert_eq!(res.relative_path, native("src/main/java"));
        assert_eq!(res.strategy, MatchStrategy::WorkspacePrefix);
    }

    #[test]
    fn workspace_root_itself_is_empty() {
        let res = resolve("/workspace/app", "/workspace/app/");
        assert_eq!(res.relative_path, "");
        assert_eq!(res.strategy, MatchStrategy::WorkspacePrefix);
    }

    #[test]
    fn relocated_build_environment_matches_suffix() {
        let res = resolve("/build/env/app/src/main/java", "/workspace/app");
        assert_eq!(res.relative_path, native("src/main/java"));
        assert_eq!(res.strategy, MatchStrategy::SegmentSuffix);
    }

    #[test]
    fn jenkins_agent_workspace_matches_longest_suffix() {
        let res = resolve(
            "/home/agent/workspace/job/module/src/main/java",
            "/var/lib/jenkins/workspace/job",
        );
        assert_eq!(res.relative_path, native("module/src/main/java"));
        assert_eq!(res.strategy, MatchStrategy::SegmentSuffix);
    }

    #[test]
    fn longer_suffix_wins_over_leftmost_short_one() {
        // "app"만 보면 첫 번째 app이 먼저지만, "ws/app" 연속 구간이 우선
        let res = resolve("/app/ws/app/src", "/ci/ws/app");
        assert_eq!(res.relative_path, native("src"));
    }

    #[test]
    fn suffix_match_is_segment_aligned() {
        // "myapp"은 "app" 세그먼트와 일치하지 않음
        let res = resolve("/build/myapp/src", "/workspace/app");
        assert_eq!(res.strategy, MatchStrategy::Unmatched);
        assert_eq!(res.relative_path, native("build/myapp/src"));
    }

    #[test]
    fn windows_paths_are_case_insensitive() {
        let res = resolve(r"c:\Jenkins\Workspace\Proj\src\main\java", r"C:\jenkins\workspace\proj");
        assert_eq!(res.relative_path, native("src/main/java"));
        assert_eq!(res.strategy, MatchStrategy::WorkspacePrefix);
    }

    #[test]
    fn mixed_separators_are_normalised() {
        let res = resolve(r"/workspace/app\src/./main\java", "/workspace/app");
        assert_eq!(res.relative_path, native("src/main/java"));
    }

    #[test]
    fn macos_private_var_prefix_is_dropped() {
        let res = resolve(
            "/private/var/folders/xy/T/ws/src/main/java",
            "/var/folders/xy/T/ws",
        );
        assert_eq!(res.relative_path, native("src/main/java"));
        assert_eq!(res.strategy, MatchStrategy::WorkspacePrefix);
    }

    #[test]
    fn private_prefix_kept_outside_var() {
        let res = resolve("/private/var/ws/src", "/home/ws");
        // "ws" 접미어로 해석되며, private 보정은 적용되지 않음
        assert_eq!(res.relative_path, native("src"));
        assert_eq!(res.strategy, MatchStrategy::SegmentSuffix);
    }

    #[test]
    fn unmatched_drops_drive_segment() {
        let res = resolve(r"D:\other\src", r"C:\ws\proj");
        assert_eq!(res.strategy, MatchStrategy::Unmatched);
        assert_eq!(res.relative_path, native("other/src"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve_relative_path("/build/env/app/src", "/workspace/app");
        let b = resolve_relative_path("/build/env/app/src", "/workspace/app");
        assert_eq!(a, b);
    }

    #[test]
    fn strategy_labels() {
        assert_eq!(MatchStrategy::WorkspacePrefix.as_str(), "workspace_prefix");
        assert_eq!(MatchStrategy::SegmentSuffix.as_str(), "segment_suffix");
        assert_eq!(MatchStrategy::Unmatched.as_str(), "unmatched");
    }
}
