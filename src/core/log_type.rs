//! Semantic log classification and the channels that produce it

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Context key carrying the [`LogType`] tag
pub const LOG_TYPE_KEY: &str = "log_type";

/// Classification attached to every event for downstream filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Normal,
    Debug,
    Error,
    Security,
    Audit,
    Http,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Normal => "normal",
            LogType::Debug => "debug",
            LogType::Error => "error",
            LogType::Security => "security",
            LogType::Audit => "audit",
            LogType::Http => "http",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the seven semantic logging entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    Info,
    Warn,
    Debug,
    Error,
    Security,
    Audit,
    Http,
}

impl LogChannel {
    pub const ALL: [LogChannel; 7] = [
        LogChannel::Info,
        LogChannel::Warn,
        LogChannel::Debug,
        LogChannel::Error,
        LogChannel::Security,
        LogChannel::Audit,
        LogChannel::Http,
    ];

    /// Tag written under [`LOG_TYPE_KEY`]
    pub fn log_type(&self) -> LogType {
        match self {
            LogChannel::Info | LogChannel::Warn => LogType::Normal,
            LogChannel::Debug => LogType::Debug,
            LogChannel::Error => LogType::Error,
            LogChannel::Security => LogType::Security,
            LogChannel::Audit => LogType::Audit,
            LogChannel::Http => LogType::Http,
        }
    }

    /// Severity used for filtering and for `log.level`
    pub fn level(&self) -> LogLevel {
        match self {
            LogChannel::Debug => LogLevel::Debug,
            LogChannel::Info | LogChannel::Audit | LogChannel::Http => LogLevel::Info,
            LogChannel::Warn | LogChannel::Security => LogLevel::Warning,
            LogChannel::Error => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_tags() {
        assert_eq!(LogChannel::Info.log_type(), LogType::Normal);
        assert_eq!(LogChannel::Warn.log_type(), LogType::Normal);
        assert_eq!(LogChannel::Debug.log_type(), LogType::Debug);
        assert_eq!(LogChannel::Error.log_type(), LogType::Error);
        assert_eq!(LogChannel::Security.log_type(), LogType::Security);
        assert_eq!(LogChannel::Audit.log_type(), LogType::Audit);
        assert_eq!(LogChannel::Http.log_type(), LogType::Http);
    }

    #[test]
    fn test_channel_severity() {
        assert_eq!(LogChannel::Security.level(), LogLevel::Warning);
        assert_eq!(LogChannel::Audit.level(), LogLevel::Info);
        assert_eq!(LogChannel::Http.level(), LogLevel::Info);
        assert_eq!(LogChannel::Warn.level(), LogLevel::Warning);
    }

    #[test]
    fn test_log_type_names() {
        assert_eq!(LogType::Security.to_string(), "security");
        assert_eq!(serde_json::to_string(&LogType::Http).unwrap(), "\"http\"");
    }
}
