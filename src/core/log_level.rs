//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

static UNKNOWN_LEVEL_WARNED: AtomicBool = AtomicBool::new(false);

/// Event severity, ordered `Debug < Info < Warning < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    /// Uppercase name as written to `log.level`
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parse a configured level, never failing.
    ///
    /// Case-insensitive. `WARN`/`WARNING` map to `Warning`, `ERROR`/`CRITICAL`
    /// map to `Error`, anything else falls back to `Info`. The first unknown
    /// non-empty value seen by the process is reported once on stderr.
    pub fn parse_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(level) => level,
            Err(_) => {
                if !s.trim().is_empty() && !UNKNOWN_LEVEL_WARNED.swap(true, Ordering::Relaxed) {
                    eprintln!(
                        "[LOGGER WARNING] Unrecognized log level '{}', defaulting to INFO",
                        s
                    );
                }
                LogLevel::Info
            }
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        LogLevel::parse_lenient(&s)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}
