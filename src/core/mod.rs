//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod error_info;
pub mod formatter;
pub mod global;
pub mod log_context;
pub mod log_event;
pub mod log_level;
pub mod log_type;
pub mod logger;
pub mod metrics;
pub mod trace_context;

pub use appender::Appender;
pub use config::{LoggerConfig, ServiceIdentity};
pub use error::{LoggerError, Result};
pub use error_info::{ErrorInfo, ErrorLike};
pub use formatter::{RecordFormatter, RESERVED_KEYS};
pub use log_context::{FieldValue, LogContext};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use log_type::{LogChannel, LogType, LOG_TYPE_KEY};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
#[cfg(feature = "opentelemetry")]
pub use trace_context::OpenTelemetryTraceProvider;
pub use trace_context::{
    NoopTraceProvider, ScopedTraceProvider, TraceContext, TraceContextProvider, TraceGuard,
};
