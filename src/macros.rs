//! Logging macros for ergonomic log message formatting.
//!
//! Each channel macro takes either `format!`-style arguments, or a message
//! expression followed by `;` and `key => value` context pairs.
//!
//! # Examples
//!
//! ```
//! use service_logger::prelude::*;
//! use service_logger::{audit, info};
//! use std::sync::Arc;
//!
//! let output = Arc::new(MemoryAppender::new());
//! let logger = Logger::builder().shared_appender(output.clone()).build();
//!
//! info!(logger, "Server listening on port {}", 8080);
//! audit!(logger, "User deleted"; "user_id" => "usr-999", "by" => "admin");
//!
//! let records = output.records();
//! assert_eq!(records[0]["message"], "Server listening on port 8080");
//! assert_eq!(records[1]["user_id"], "usr-999");
//! ```

/// Build a [`LogContext`](crate::LogContext) from `key => value` pairs.
///
/// ```
/// use service_logger::context;
///
/// let ctx = context! { "user_id" => "usr-123", "attempts" => 3 };
/// assert_eq!(ctx.len(), 2);
/// assert!(context! {}.is_empty());
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::LogContext::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut ctx = $crate::LogContext::new();
        $(
            ctx.insert($key, $value);
        )+
        ctx
    }};
}

/// Log through a channel.
///
/// ```
/// # use service_logger::prelude::*;
/// # let logger = Logger::builder().appender(MemoryAppender::new()).build();
/// use service_logger::log;
/// log!(logger, LogChannel::Info, "Simple message");
/// log!(logger, LogChannel::Error, "Error code: {}", 500);
/// log!(logger, LogChannel::Audit, "Role granted"; "role" => "admin");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $channel:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.log($channel, $msg, $crate::context!($($key => $value),+))
    };
    ($logger:expr, $channel:expr, $($arg:tt)+) => {
        $logger.log($channel, format!($($arg)+), $crate::LogContext::new())
    };
}

/// Log a debug-channel message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Debug, $($arg)+)
    };
}

/// Log an info-channel message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Info, $($arg)+)
    };
}

/// Log a warn-channel message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Warn, $($arg)+)
    };
}

/// Log an error-channel message.
///
/// ```
/// # use service_logger::prelude::*;
/// # let logger = Logger::builder().appender(MemoryAppender::new()).build();
/// use service_logger::error;
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// error!(logger, "Write failed"; "error" => FieldValue::error(&err), "path" => "/var/data");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Error, $($arg)+)
    };
}

/// Log a security-channel message.
#[macro_export]
macro_rules! security {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Security, $($arg)+)
    };
}

/// Log an audit-channel message.
#[macro_export]
macro_rules! audit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Audit, $($arg)+)
    };
}

/// Log an http-channel message.
#[macro_export]
macro_rules! http {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogChannel::Http, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{LogChannel, LogLevel, Logger, NoopTraceProvider};
    use std::sync::Arc;

    fn logger() -> (Logger, Arc<MemoryAppender>) {
        let output = Arc::new(MemoryAppender::new());
        let logger = Logger::builder()
            .min_level(LogLevel::Debug)
            .shared_appender(output.clone())
            .trace_provider(NoopTraceProvider)
            .build();
        (logger, output)
    }

    #[test]
    fn test_context_macro() {
        let ctx = context! { "a" => 1, "b" => "two", "a" => 3 };
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ctx.get("a"), Some(&crate::FieldValue::Int(3)));
    }

    #[test]
    fn test_log_macro() {
        let (logger, output) = logger();
        log!(logger, LogChannel::Info, "Test message");
        log!(logger, LogChannel::Info, "Formatted: {}", 42);
        log!(logger, LogChannel::Info, "With context"; "k" => "v");

        let records = output.records();
        assert_eq!(records[1]["message"], "Formatted: 42");
        assert_eq!(records[2]["k"], "v");
    }

    #[test]
    fn test_channel_macros() {
        let (logger, output) = logger();
        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        security!(logger, "Blocked"; "ip" => "192.168.1.1");
        audit!(logger, "Deleted"; "user_id" => "usr-999");
        http!(logger, "GET /api/users"; "status" => 200);

        let types: Vec<String> = output
            .records()
            .iter()
            .map(|r| r["log_type"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            types,
            vec!["debug", "normal", "normal", "error", "security", "audit", "http"]
        );
    }
}
