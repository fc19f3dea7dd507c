//! 프로젝트 빌드 레코드 파서
//!
//! 실행 이벤트 하나에서 프로젝트 식별자와 선언된 소스 디렉토리를 꺼냅니다.
//! `project`/`build` 노드가 없는 이벤트는 흔하므로 (소스 선언 전에 실패한 프로젝트 등)
//! 에러가 아니라 [`SkipReason`]으로 돌려주고, 호출자는 건너뛰고 계속 진행합니다.

use std::fmt;

use roxmltree::Node;
use serde::Serialize;

const PROJECT_TAG: &str = "project";
const BUILD_TAG: &str = "build";

/// 프로젝트 식별자 (진단 메시지용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// 패키징 타입 (`type`, 없으면 `packaging` 속성)
    pub packaging: Option<String>,
    pub classifier: Option<String>,
    /// 사람이 읽는 프로젝트 이름
    pub name: Option<String>,
}

impl ProjectIdentity {
    /// `project` 노드의 속성에서 식별자를 만듭니다.
    ///
    /// 없는 필수 속성은 빈 문자열로 둡니다.
    pub fn from_node(project: Node<'_, '_>) -> Self {
        let attr = |name: &str| project.attribute(name).unwrap_or_default().to_owned();
        let optional = |name: &str| {
            project
                .attribute(name)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        Self {
            group_id: attr("groupId"),
            artifact_id: attr("artifactId"),
            version: attr("version"),
            packaging: optional("type").or_else(|| optional("packaging")),
            classifier: optional("classifier"),
            name: optional("name"),
        }
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(packaging) = &self.packaging {
            write!(f, ":{packaging}")?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

/// `build` 노드에서 읽은 디렉토리 선언
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
    /// 빌드 시점에 기록된 소스 디렉토리 절대 경로
    pub source_directory: String,
    /// 빌드 출력 디렉토리 (`directory` 속성)
    pub output_directory: Option<String>,
}

/// 사용 가능한 빌드 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildRecord {
    pub project: ProjectIdentity,
    pub build: BuildDescriptor,
    /// 프로젝트 기준 디렉토리 (`baseDir` 속성)
    pub base_dir: Option<String>,
}

/// 이벤트를 건너뛰는 사유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `project` 자식이 없음
    MissingProject,
    /// `project` 또는 `build` 자식이 둘 이상
    DuplicateChild {
        tag: &'static str,
        project: Option<ProjectIdentity>,
    },
    /// `build` 자식이 없음
    MissingBuild { project: ProjectIdentity },
    /// `sourceDirectory`가 없거나 비어 있음
    EmptySourceDirectory { project: ProjectIdentity },
}

impl SkipReason {
    /// 메트릭 레이블 값
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::MissingProject => "missing_project",
            Self::DuplicateChild { .. } => "duplicate_child",
            Self::MissingBuild { .. } => "missing_build",
            Self::EmptySourceDirectory { .. } => "empty_source_directory",
        }
    }

    /// 식별된 프로젝트 (있을 경우)
    pub fn project(&self) -> Option<&ProjectIdentity> {
        match self {
            Self::MissingProject => None,
            Self::DuplicateChild { project, .. } => project.as_ref(),
            Self::MissingBuild { project } | Self::EmptySourceDirectory { project } => {
                Some(project)
            }
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProject => write!(f, "execution event has no 'project' child"),
            Self::DuplicateChild { tag, .. } => write!(f, "more than one '{tag}' child"),
            Self::MissingBuild { project } => {
                write!(f, "project {project} has no 'build' child")
            }
            Self::EmptySourceDirectory { project } => {
                write!(f, "project {project} declares no source directory")
            }
        }
    }
}

/// 이벤트 노드에서 빌드 레코드를 파싱합니다.
pub fn parse_build_record(event: Node<'_, '_>) -> Result<BuildRecord, SkipReason> {
    let project_node = match unique_child(event, PROJECT_TAG) {
        Ok(Some(node)) => node,
        Ok(None) => return Err(SkipReason::MissingProject),
        Err(tag) => {
            return Err(SkipReason::DuplicateChild { tag, project: None });
        }
    };

    let project = ProjectIdentity::from_node(project_node);

    let build_node = match unique_child(project_node, BUILD_TAG) {
        Ok(Some(node)) => node,
        Ok(None) => return Err(SkipReason::MissingBuild { project }),
        Err(tag) => {
            return Err(SkipReason::DuplicateChild {
                tag,
                project: Some(project),
            });
        }
    };

    let source_directory = match build_node.attribute("sourceDirectory") {
        Some(dir) if !dir.trim().is_empty() => dir.to_owned(),
        _ => return Err(SkipReason::EmptySourceDirectory { project }),
    };

    let output_directory = build_node
        .attribute("directory")
        .filter(|d| !d.is_empty())
        .map(str::to_owned);

    let base_dir = project_node
        .attribute("baseDir")
        .filter(|d| !d.is_empty())
        .map(str::to_owned);

    Ok(BuildRecord {
        project,
        build: BuildDescriptor {
            source_directory,
            output_directory,
        },
        base_dir,
    })
}

/// 이름이 `tag`인 유일한 자식 요소를 찾습니다. 둘 이상이면 `Err(tag)`.
fn unique_child<'a, 'input>(
    parent: Node<'a, 'input>,
    tag: &'static str,
) -> Result<Option<Node<'a, 'input>>, &'static str> {
    let mut matches = parent
        .children()
        .filter(|n| n.is_element() && n.has_tag_name(tag));
    let first = matches.next();
    if first.is_some() && matches.next().is_some() {
        return Err(tag);
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn parse_event(xml: &str) -> Result<BuildRecord, SkipReason> {
        let doc = Document::parse(xml).unwrap();
        parse_build_record(doc.root_element())
    }

    #[test]
    fn parses_complete_record() {
        let record = parse_event(
            r#"<ExecutionEvent type="ProjectSucceeded">
                <project baseDir="/ci/app" file="/ci/app/pom.xml" groupId="org.example"
                         name="Example App" artifactId="app" version="1.0-SNAPSHOT">
                  <build sourceDirectory="/ci/app/src/main/java" directory="/ci/app/target"/>
                </project>
              </ExecutionEvent>"#,
        )
        .unwrap();

        assert_eq!(record.project.group_id, "org.example");
        assert_eq!(record.project.artifact_id, "app");
        assert_eq!(record.project.version, "1.0-SNAPSHOT");
        assert_eq!(record.project.name.as_deref(), Some("Example App"));
        assert_eq!(record.build.source_directory, "/ci/app/src/main/java");
        assert_eq!(
            record.build.output_directory.as_deref(),
            Some("/ci/app/target")
        );
        assert_eq!(record.base_dir.as_deref(), Some("/ci/app"));
    }

    #[test]
    fn missing_project_is_skipped() {
        let reason = parse_event(r#"<ExecutionEvent type="ProjectFailed"/>"#).unwrap_err();
        assert_eq!(reason, SkipReason::MissingProject);
        assert!(reason.project().is_none());
    }

    #[test]
    fn missing_build_keeps_identity() {
        let reason = parse_event(
            r#"<ExecutionEvent type="ProjectFailed">
                <project groupId="g" artifactId="a" version="1"/>
              </ExecutionEvent>"#,
        )
        .unwrap_err();
        assert_eq!(reason.as_label(), "missing_build");
        assert_eq!(reason.project().unwrap().to_string(), "g:a:1");
    }

    #[test]
    fn empty_source_directory_is_skipped() {
        let reason = parse_event(
            r#"<ExecutionEvent type="ProjectSucceeded">
                <project groupId="g" artifactId="a" version="1">
                  <build sourceDirectory="" directory="/t"/>
                </project>
              </ExecutionEvent>"#,
        )
        .unwrap_err();
        assert!(matches!(reason, SkipReason::EmptySourceDirectory { .. }));
    }

    #[test]
    fn absent_source_directory_attribute_is_skipped() {
        let reason = parse_event(
            r#"<ExecutionEvent type="ProjectSucceeded">
                <project groupId="g" artifactId="a" version="1"><build/></project>
              </ExecutionEvent>"#,
        )
        .unwrap_err();
        assert_eq!(reason.as_label(), "empty_source_directory");
    }

    #[test]
    fn duplicate_project_is_skipped() {
        let reason = parse_event(
            r#"<ExecutionEvent type="ProjectSucceeded">
                <project artifactId="a"/><project artifactId="b"/>
              </ExecutionEvent>"#,
        )
        .unwrap_err();
        assert_eq!(
            reason,
            SkipReason::DuplicateChild {
                tag: "project",
                project: None
            }
        );
    }

    #[test]
    fn duplicate_build_is_skipped_with_identity() {
        let reason = parse_event(
            r#"<ExecutionEvent type="ProjectSucceeded">
                <project groupId="g" artifactId="a" version="1">
                  <build sourceDirectory="/x"/><build sourceDirectory="/y"/>
                </project>
              </ExecutionEvent>"#,
        )
        .unwrap_err();
        assert_eq!(reason.as_label(), "duplicate_child");
        assert!(reason.project().is_some());
        assert_eq!(reason.to_string(), "more than one 'build' child");
    }

    #[test]
    fn identity_display_includes_packaging_and_classifier() {
        let doc = Document::parse(
            r#"<project groupId="org.example" artifactId="lib" version="2.1"
                        packaging="jar" classifier="tests"/>"#,
        )
        .unwrap();
        let identity = ProjectIdentity::from_node(doc.root_element());
        assert_eq!(identity.to_string(), "org.example:lib:jar:tests:2.1");
    }

    #[test]
    fn identity_prefers_type_over_packaging() {
        let doc = Document::parse(
            r#"<project groupId="g" artifactId="a" version="1" type="war" packaging="jar"/>"#,
        )
        .unwrap();
        let identity = ProjectIdentity::from_node(doc.root_element());
        assert_eq!(identity.packaging.as_deref(), Some("war"));
    }
}
