#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod listener;
pub mod metrics;
pub mod types;
pub mod workspace;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, ParseError, SpylogError, TasksError};

// 설정
pub use config::{GeneralConfig, SpylogConfig, TasksConfig};

// 리스너 / 워크스페이스 trait
pub use listener::{ListenerLevel, MemoryListener, StreamListener, TaskListener};
pub use workspace::{LocalWorkspace, Workspace};

// 도메인 타입
pub use types::{TaskMarkers, TaskPriority};
