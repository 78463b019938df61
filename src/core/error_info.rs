//! Error values carried inside log context
//!
//! The error channel flattens any context value implementing [`ErrorLike`]
//! into `error.message`, `error.type`, `error.file`, `error.line` and
//! `error.stack_trace`.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;

/// Capability exposed by values the error channel can unpack
pub trait ErrorLike: fmt::Debug + Send + Sync {
    fn message(&self) -> &str;
    fn type_name(&self) -> &str;
    fn file(&self) -> &str;
    fn line(&self) -> u32;
    fn stack_trace(&self) -> &str;
}

/// Owned snapshot of an error taken at the point it was logged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    message: String,
    type_name: String,
    file: String,
    line: u32,
    stack_trace: String,
}

impl ErrorInfo {
    /// Build an error description by hand, located at the caller
    #[track_caller]
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            message: message.into(),
            type_name: type_name.into(),
            file: location.file().to_string(),
            line: location.line(),
            stack_trace: String::new(),
        }
    }

    /// Capture a `std::error::Error`, recording the caller's location.
    ///
    /// The stack trace lists the `source()` chain, followed by a backtrace
    /// when `RUST_BACKTRACE` enables one.
    #[track_caller]
    pub fn capture<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let location = Location::caller();
        Self {
            message: error.to_string(),
            type_name: std::any::type_name::<E>().to_string(),
            file: location.file().to_string(),
            line: location.line(),
            stack_trace: render_stack_trace(error),
        }
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }
}

impl ErrorLike for ErrorInfo {
    fn message(&self) -> &str {
        &self.message
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn file(&self) -> &str {
        &self.file
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn stack_trace(&self) -> &str {
        &self.stack_trace
    }
}

fn render_stack_trace<E>(error: &E) -> String
where
    E: std::error::Error + ?Sized,
{
    let mut lines = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("#{} caused by: {}", lines.len(), cause));
        source = cause.source();
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        lines.push(backtrace.to_string());
    }

    lines.join("\n")
}
