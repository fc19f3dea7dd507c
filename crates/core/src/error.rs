//! 에러 타입 - 도메인별 에러 정의

/// spylog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SpylogError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 빌드 이벤트 로그 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 태스크 스캔 에러
    #[error("tasks error: {0}")]
    Tasks(#[from] TasksError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 문서 구문 오류
    #[error("malformed document at {position}: {reason}")]
    Malformed { position: String, reason: String },

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },
}

/// 태스크 스캔 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum TasksError {
    /// 스파이 로그를 읽을 수 없음
    #[error("spy log unavailable: {0}")]
    SpyLogUnavailable(String),
}
