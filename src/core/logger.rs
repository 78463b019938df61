//! Main logger implementation
//!
//! Each channel call runs the whole pipeline on the caller's thread:
//! level check, error unpacking (error channel only), log-type tagging,
//! trace enrichment, formatting and a single append. There is no queue and
//! no background thread, so a call never waits on anything but the
//! appender's own write.

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::Result,
    formatter::RecordFormatter,
    log_context::LogContext,
    log_event::LogEvent,
    log_level::LogLevel,
    log_type::{LogChannel, LOG_TYPE_KEY},
    metrics::LoggerMetrics,
    trace_context::{ScopedTraceProvider, TraceContext, TraceContextProvider},
};
use crate::appenders::ConsoleAppender;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Context key the error channel unpacks
pub const ERROR_KEY: &str = "error";

pub const ERROR_MESSAGE_KEY: &str = "error.message";
pub const ERROR_TYPE_KEY: &str = "error.type";
pub const ERROR_FILE_KEY: &str = "error.file";
pub const ERROR_LINE_KEY: &str = "error.line";
pub const ERROR_STACK_TRACE_KEY: &str = "error.stack_trace";

pub struct Logger {
    config: LoggerConfig,
    formatter: RecordFormatter,
    appender: Arc<dyn Appender>,
    trace_provider: Arc<dyn TraceContextProvider>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to stdout with thread-scoped trace correlation
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn min_level(&self) -> LogLevel {
        self.config.level
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.config.level
    }

    /// Log through a channel
    ///
    /// The channel's log type is tagged first and caller context merged on
    /// top, so a caller-supplied `log_type` wins.
    pub fn log(&self, channel: LogChannel, message: impl Into<String>, context: LogContext) {
        let level = channel.level();
        if !self.is_enabled(level) {
            return;
        }

        let context = if channel == LogChannel::Error {
            unpack_error(context)
        } else {
            context
        };

        let mut fields = LogContext::new().with_field(LOG_TYPE_KEY, channel.log_type().as_str());
        fields.extend(context);

        let mut event = LogEvent::new(level, message).with_context(fields);
        if let Some(trace) = self.current_trace() {
            event.extra = trace.to_context();
        }

        self.emit(&event);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Info, message, context);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Warn, message, context);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Debug, message, context);
    }

    /// Log an error; an error-like value under `"error"` is flattened into
    /// `error.message`, `error.type`, `error.file`, `error.line` and
    /// `error.stack_trace`
    #[inline]
    pub fn error(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Error, message, context);
    }

    /// Security event, filtered at `WARNING` severity
    #[inline]
    pub fn security(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Security, message, context);
    }

    #[inline]
    pub fn audit(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Audit, message, context);
    }

    #[inline]
    pub fn http(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogChannel::Http, message, context);
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.flush()
    }

    /// Ask the provider for the active span, treating a panic as "none"
    fn current_trace(&self) -> Option<TraceContext> {
        let provider = &self.trace_provider;
        catch_unwind(AssertUnwindSafe(|| provider.current_context())).unwrap_or(None)
    }

    /// Format and write an accepted event; failures never reach the caller
    fn emit(&self, event: &LogEvent) {
        let line = match self.formatter.format(event) {
            Ok(line) => line,
            Err(e) => {
                self.metrics.record_format_error();
                eprintln!("[LOGGER ERROR] Dropping unformattable event '{}': {}", event.message, e);
                return;
            }
        };

        match self.appender.append(&line) {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(e) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", self.appender.name(), e);
            }
        }
    }
}

/// Replace an error-like `"error"` value with its flattened fields.
/// Any other value under that key is left as is.
fn unpack_error(mut context: LogContext) -> LogContext {
    let flattened = match context.get(ERROR_KEY).and_then(|value| value.as_error()) {
        Some(err) => LogContext::new()
            .with_field(ERROR_MESSAGE_KEY, err.message())
            .with_field(ERROR_TYPE_KEY, err.type_name())
            .with_field(ERROR_FILE_KEY, err.file())
            .with_field(ERROR_LINE_KEY, err.line())
            .with_field(ERROR_STACK_TRACE_KEY, err.stack_trace()),
        None => return context,
    };

    context.remove(ERROR_KEY);
    context.extend(flattened);
    context
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use service_logger::prelude::*;
/// use std::sync::Arc;
///
/// let output = Arc::new(MemoryAppender::new());
/// let logger = Logger::builder()
///     .config(LoggerConfig::new("orders", "1.0.0", "test").with_level(LogLevel::Debug))
///     .shared_appender(output.clone())
///     .trace_provider(NoopTraceProvider)
///     .build();
///
/// logger.debug("cache warmed", LogContext::new());
/// assert_eq!(output.len(), 1);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    appender: Option<Arc<dyn Appender>>,
    trace_provider: Option<Arc<dyn TraceContextProvider>>,
    hostname: Option<String>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::from_lookup(|_| None),
            appender: None,
            trace_provider: None,
            hostname: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Set the output destination (stdout when not called)
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Arc::new(appender));
        self
    }

    /// Set an output destination the caller keeps a handle to
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appender = Some(appender);
        self
    }

    /// Set the trace provider ([`ScopedTraceProvider`] when not called)
    #[must_use = "builder methods return a new value"]
    pub fn trace_provider<P: TraceContextProvider + 'static>(mut self, provider: P) -> Self {
        self.trace_provider = Some(Arc::new(provider));
        self
    }

    /// Override host name resolution
    #[must_use = "builder methods return a new value"]
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let identity = self.config.identity();
        let formatter = match self.hostname {
            Some(hostname) => RecordFormatter::with_hostname(identity, hostname),
            None => RecordFormatter::new(identity),
        };

        Logger {
            config: self.config,
            formatter,
            appender: self
                .appender
                .unwrap_or_else(|| Arc::new(ConsoleAppender::stdout())),
            trace_provider: self
                .trace_provider
                .unwrap_or_else(|| Arc::new(ScopedTraceProvider)),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
