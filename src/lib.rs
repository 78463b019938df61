//! # Service Logger
//!
//! Structured JSON logging for web services. Every record is one JSON object
//! per line, stamped with the service identity, host and active trace.
//!
//! ## Features
//!
//! - **Channels**: info, warn, debug, error, security, audit and http, each
//!   tagged with a `log_type` for downstream routing
//! - **Error unpacking**: errors on the error channel expand into
//!   `error.message`, `error.type`, `error.file`, `error.line` and
//!   `error.stack_trace`
//! - **Trace correlation**: `trace_id` / `span_id` / `trace_flags` from a
//!   pluggable [`TraceContextProvider`]
//! - **HTTP middleware**: one record per request with timing, status routing
//!   and header redaction
//! - **Process-wide access**: optional `initialize` / `get_instance` /
//!   `reset` for code that cannot be handed a logger
//!
//! ## Example
//!
//! ```
//! use service_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let output = Arc::new(MemoryAppender::new());
//! let logger = Logger::builder()
//!     .config(LoggerConfig::new("billing", "2.3.1", "staging"))
//!     .shared_appender(output.clone())
//!     .build();
//!
//! logger.info("Payment captured", LogContext::new().with_field("amount", 42));
//!
//! let record = &output.records()[0];
//! assert_eq!(record["service.name"], "billing");
//! assert_eq!(record["log_type"], "normal");
//! assert_eq!(record["amount"], 42);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;
pub mod middleware;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget, MemoryAppender, WriterAppender};
    pub use crate::core::{
        Appender, ErrorInfo, ErrorLike, FieldValue, LogChannel, LogContext, LogEvent, LogLevel,
        LogType, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        NoopTraceProvider, RecordFormatter, Result, ScopedTraceProvider, ServiceIdentity,
        TraceContext, TraceContextProvider, TraceGuard,
    };
    pub use crate::middleware::{
        HttpLogger, HttpLoggerConfig, HttpRequest, HttpRequestInfo, ResponseStatus,
    };
}

pub use crate::appenders::{ConsoleAppender, ConsoleTarget, MemoryAppender, WriterAppender};
pub use crate::core::global::{
    get_instance, init_from_env, initialize, install, is_initialized, reset,
};
#[cfg(feature = "opentelemetry")]
pub use crate::core::OpenTelemetryTraceProvider;
pub use crate::core::{
    Appender, ErrorInfo, ErrorLike, FieldValue, LogChannel, LogContext, LogEvent, LogLevel,
    LogType, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, NoopTraceProvider,
    RecordFormatter, Result, ScopedTraceProvider, ServiceIdentity, TraceContext,
    TraceContextProvider, TraceGuard, LOG_TYPE_KEY, RESERVED_KEYS,
};
pub use crate::middleware::{
    HttpLogger, HttpLoggerConfig, HttpRequest, HttpRequestInfo, ResponseStatus,
};
