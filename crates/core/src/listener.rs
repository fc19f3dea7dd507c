//! 리스너 - 사용자에게 보이는 빌드 로그 출력 인터페이스
//!
//! [`TaskListener`]는 호스트가 주입하는 출력 대상입니다. 전역 로거 대신
//! 각 호출에 명시적으로 전달되며, 진단용 로그는 `tracing`으로 따로 남깁니다.
//!
//! # 구현체
//!
//! - [`StreamListener`]: `Write` 스트림(stdout/stderr)에 `[spylog]` 접두어로 출력
//! - [`MemoryListener`]: 출력 줄을 메모리에 기록 (테스트, 임베딩 호스트용)

use std::io::Write;

/// 출력 줄 접두어
pub const LISTENER_PREFIX: &str = "[spylog]";

/// 사용자에게 보이는 메시지를 받는 리스너
pub trait TaskListener: Send {
    /// 정보 메시지
    fn info(&mut self, message: &str);

    /// 경고 메시지
    fn warn(&mut self, message: &str);

    /// 에러 메시지 (실행은 계속됩니다)
    fn error(&mut self, message: &str);

    /// 하이퍼링크를 메시지 안에 넣을 수 있는 형태로 렌더링합니다.
    ///
    /// 링크를 지원하지 않는 리스너는 `text (url)` 형태를 반환합니다.
    fn hyperlink(&self, url: &str, text: &str) -> String {
        format!("{text} ({url})")
    }
}

/// 메시지 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerLevel {
    Info,
    Warn,
    Error,
}

/// `Write` 스트림 기반 리스너
pub struct StreamListener<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> StreamListener<W> {
    /// 주어진 스트림으로 리스너를 생성합니다.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// 내부 스트림을 돌려받습니다.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, level: ListenerLevel, message: &str) {
        let result = match level {
            ListenerLevel::Info => writeln!(self.out, "{LISTENER_PREFIX} {message}"),
            ListenerLevel::Warn => writeln!(self.out, "{LISTENER_PREFIX} WARNING: {message}"),
            ListenerLevel::Error => writeln!(self.out, "{LISTENER_PREFIX} ERROR: {message}"),
        };
        // 출력 실패로 처리 흐름을 멈추지 않음
        if let Err(e) = result {
            tracing::debug!(error = %e, "listener write failed");
        }
    }
}

impl StreamListener<std::io::Stderr> {
    /// 리스너가 없을 때 쓰는 stderr 폴백
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl StreamListener<std::io::Stdout> {
    /// stdout 리스너
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TaskListener for StreamListener<W> {
    fn info(&mut self, message: &str) {
        self.write_line(ListenerLevel::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.write_line(ListenerLevel::Warn, message);
    }

    fn error(&mut self, message: &str) {
        self.write_line(ListenerLevel::Error, message);
    }
}

/// 메모리에 출력 줄을 기록하는 리스너
#[derive(Debug, Default)]
pub struct MemoryListener {
    lines: Vec<(ListenerLevel, String)>,
}

impl MemoryListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록된 모든 줄
    pub fn lines(&self) -> &[(ListenerLevel, String)] {
        &self.lines
    }

    /// 특정 레벨의 메시지만 반환합니다.
    pub fn messages(&self, level: ListenerLevel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl TaskListener for MemoryListener {
    fn info(&mut self, message: &str) {
        self.lines.push((ListenerLevel::Info, message.to_owned()));
    }

    fn warn(&mut self, message: &str) {
        self.lines.push((ListenerLevel::Warn, message.to_owned()));
    }

    fn error(&mut self, message: &str) {
        self.lines.push((ListenerLevel::Error, message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_listener_prefixes_lines() {
        let mut listener = StreamListener::new(Vec::new());
        listener.info("scan started");
        listener.warn("slow disk");
        listener.error("scanner crashed");

        let output = String::from_utf8(listener.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[spylog] scan started");
        assert_eq!(lines[1], "[spylog] WARNING: slow disk");
        assert_eq!(lines[2], "[spylog] ERROR: scanner crashed");
    }

    #[test]
    fn default_hyperlink_renders_text_and_url() {
        let listener = MemoryListener::new();
        let link = listener.hyperlink("https://example.org/tasks", "Task Scanner");
        assert_eq!(link, "Task Scanner (https://example.org/tasks)");
    }

    #[test]
    fn memory_listener_filters_by_level() {
        let mut listener = MemoryListener::new();
        listener.info("a");
        listener.error("b");
        listener.info("c");
        assert_eq!(listener.messages(ListenerLevel::Info), vec!["a", "c"]);
        assert_eq!(listener.messages(ListenerLevel::Error), vec!["b"]);
        assert!(listener.messages(ListenerLevel::Warn).is_empty());
        assert_eq!(listener.lines().len(), 3);
    }
}
