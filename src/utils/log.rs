use std::sync::{Arc, Mutex};

/// Environment variable selecting the minimum level for [`Logger::from_env`].
pub const LOG_LEVEL_ENV: &str = "MSGTEXT_LOG_LEVEL";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parse a level name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<LogLevel> {
        use super::strings::strcasecmp;

        [
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warning),
            ("warning", LogLevel::Warning),
            ("error", LogLevel::Error),
        ]
        .into_iter()
        .find(|(candidate, _)| strcasecmp(name, candidate) == 0)
        .map(|(_, level)| level)
    }
}

pub trait LogHandler: Send + Sync {
    fn handle(&self, level: LogLevel, msg: &str);
}

pub struct ConsoleLogger;

impl LogHandler for ConsoleLogger {
    fn handle(&self, level: LogLevel, msg: &str) {
        if level == LogLevel::Error {
            eprintln!("{}", msg);
            return;
        }
        println!("{}", msg);
    }
}

/// Collects formatted lines in memory. Mostly useful in tests.
#[derive(Default, Clone)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogHandler for MemoryLogger {
    fn handle(&self, _level: LogLevel, msg: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(msg.to_string());
    }
}

/// A leveled logger handed to the code that needs it, rather than installed
/// process-wide.
#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    handler: Arc<dyn LogHandler>,
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(LogLevel::Info, Arc::new(ConsoleLogger))
    }
}

impl Logger {
    pub fn new(level: LogLevel, handler: Arc<dyn LogHandler>) -> Self {
        Self { level, handler }
    }

    /// Console logger whose level comes from `MSGTEXT_LOG_LEVEL`, defaulting
    /// to Info when unset or unrecognised.
    pub fn from_env() -> Self {
        let level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Info);
        Logger::new(level, Arc::new(ConsoleLogger))
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn log(&self, level: LogLevel, name: &str, msg: &str) {
        if !self.enabled(level) {
            return;
        }

        let cur_thread = std::thread::current().id();
        let formatted_msg = format!("[{}] [{:?}] [{}] {}", level.as_str(), cur_thread, name, msg);
        self.handler.handle(level, &formatted_msg);
    }

    pub fn debug(&self, name: &str, msg: &str) {
        self.log(LogLevel::Debug, name, msg);
    }

    pub fn info(&self, name: &str, msg: &str) {
        self.log(LogLevel::Info, name, msg);
    }

    pub fn warn(&self, name: &str, msg: &str) {
        self.log(LogLevel::Warning, name, msg);
    }

    pub fn error(&self, name: &str, msg: &str) {
        self.log(LogLevel::Error, name, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_below_level() {
        let sink = MemoryLogger::new();
        let logger = Logger::new(LogLevel::Warning, Arc::new(sink.clone()));

        logger.debug("test", "hidden");
        logger.info("test", "hidden");
        logger.warn("test", "shown");
        logger.error("test", "shown too");

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[WARN] "));
        assert!(lines[0].ends_with("[test] shown"));
        assert!(lines[1].starts_with("[ERROR] "));
    }

    #[test]
    fn parses_level_names() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warn"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
