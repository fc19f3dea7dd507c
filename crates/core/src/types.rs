//! 도메인 타입 - 시스템 전역에서 사용되는 공통 타입
//!
//! 태스크 마커와 우선순위처럼 리포터와 CLI가 함께 쓰는 값 타입을 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 태스크 우선순위
///
/// 외부 스캐너가 마커를 분류하는 세 단계입니다.
/// `Ord` 구현으로 비교가 가능합니다 (`Low < Normal < High`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// 낮은 우선순위
    Low,
    /// 보통 우선순위
    #[default]
    Normal,
    /// 높은 우선순위
    High,
}

impl TaskPriority {
    /// 스캐너 인자 이름 (`--high`, `--normal`, `--low`)에 쓰이는 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Normal => write!(f, "Normal"),
            Self::High => write!(f, "High"),
        }
    }
}

/// 마커 키워드와 우선순위 매핑
///
/// 정책으로 고정된 값(`FIXME` → High, `TODO` → Normal)을 스캐너에 그대로 전달합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMarkers {
    /// 높은 우선순위 마커
    pub high: Vec<String>,
    /// 보통 우선순위 마커
    pub normal: Vec<String>,
    /// 낮은 우선순위 마커
    pub low: Vec<String>,
}

impl TaskMarkers {
    /// 기본 마커 정책
    pub fn policy() -> Self {
        Self {
            high: vec!["FIXME".to_owned()],
            normal: vec!["TODO".to_owned()],
            low: Vec::new(),
        }
    }

    /// 해당 우선순위의 마커 목록
    pub fn markers(&self, priority: TaskPriority) -> &[String] {
        match priority {
            TaskPriority::High => &self.high,
            TaskPriority::Normal => &self.normal,
            TaskPriority::Low => &self.low,
        }
    }
}

impl Default for TaskMarkers {
    fn default() -> Self {
        Self::policy()
    }
}

impl fmt::Display for TaskMarkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for priority in [TaskPriority::High, TaskPriority::Normal, TaskPriority::Low] {
            for marker in self.markers(priority) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{marker}={priority}")?;
                first = false;
            }
        }
        Ok(())
    }
}
