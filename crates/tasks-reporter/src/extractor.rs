//! 실행 이벤트 추출기
//!
//! 빌드 도구 계측 훅이 남긴 스파이 로그(XML)에서 `ExecutionEvent` 노드를 꺼냅니다.
//!
//! ```text
//! <mavenExecution>
//!   <ExecutionEvent type="ProjectSucceeded" ...>
//!     <project groupId=".." artifactId=".." version=".." baseDir=".." file="..">
//!       <build sourceDirectory="/.../src/main/java" directory="/.../target"/>
//!     </project>
//!   </ExecutionEvent>
//!   ...
//! </mavenExecution>
//! ```
//!
//! 추출은 지연 평가이며, 호출할 때마다 문서를 처음부터 다시 순회합니다.

use roxmltree::{Document, Node};

use crate::error::TasksReporterError;

/// 실행 이벤트 노드 태그
pub const EXECUTION_EVENT_TAG: &str = "ExecutionEvent";

/// 이벤트 타입 속성
pub const EVENT_TYPE_ATTR: &str = "type";

/// 파싱된 스파이 로그 문서
///
/// 입력 문자열을 빌려 쓰므로 호출자가 원본 텍스트를 소유합니다.
pub struct SpyLog<'input> {
    document: Document<'input>,
}

impl<'input> SpyLog<'input> {
    /// XML 텍스트를 파싱합니다.
    pub fn parse(xml: &'input str) -> Result<Self, TasksReporterError> {
        let document = Document::parse(xml).map_err(|e| {
            let pos = e.pos();
            TasksReporterError::SpyLogParse {
                position: format!("{}:{}", pos.row, pos.col),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { document })
    }

    /// 크기 제한을 확인한 뒤 XML 텍스트를 파싱합니다.
    pub fn parse_with_limit(xml: &'input str, max_size: usize) -> Result<Self, TasksReporterError> {
        if xml.len() > max_size {
            return Err(TasksReporterError::SpyLogTooLarge {
                size: xml.len(),
                max: max_size,
            });
        }
        Self::parse(xml)
    }

    /// 내부 문서
    pub fn document(&self) -> &Document<'input> {
        &self.document
    }

    /// 주어진 타입의 실행 이벤트를 문서 순서대로 반환합니다.
    pub fn execution_events<'a, S: AsRef<str>>(
        &'a self,
        event_types: &'a [S],
    ) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        execution_events(&self.document, event_types)
    }
}

/// 루트 요소의 직계 자식 중 `type`이 `event_types`에 속하는 `ExecutionEvent`를 반환합니다.
///
/// 매칭되는 노드가 없으면 빈 시퀀스입니다.
pub fn execution_events<'a, 'input, S: AsRef<str>>(
    document: &'a Document<'input>,
    event_types: &'a [S],
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    document
        .root_element()
        .children()
        .filter(|node| node.is_element() && node.has_tag_name(EXECUTION_EVENT_TAG))
        .filter(move |node| {
            node.attribute(EVENT_TYPE_ATTR)
                .is_some_and(|t| event_types.iter().any(|expected| expected.as_ref() == t))
        })
}
