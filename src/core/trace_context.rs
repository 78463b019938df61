//! Distributed tracing correlation
//!
//! The logger asks a [`TraceContextProvider`] for the active span on every
//! accepted event. When one exists, `trace_id`, `span_id` and `trace_flags`
//! are merged into the record's extra fields; otherwise nothing is added.
//!
//! Providers:
//! - [`NoopTraceProvider`]: never reports a span
//! - [`ScopedTraceProvider`]: thread-local span entered with a [`TraceGuard`]
//! - closures `Fn() -> Option<TraceContext>`
//! - `OpenTelemetryTraceProvider` (feature `opentelemetry`)

use super::log_context::LogContext;
use std::cell::RefCell;
use std::marker::PhantomData;

pub const TRACE_ID_KEY: &str = "trace_id";
pub const SPAN_ID_KEY: &str = "span_id";
pub const TRACE_FLAGS_KEY: &str = "trace_flags";

/// Identifiers of the active span; all three are always present together
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceContext {
    trace_id: String,
    span_id: String,
    trace_flags: u8,
}

impl TraceContext {
    /// Build a context from W3C-style identifiers.
    ///
    /// Returns `None` unless the trace id is 32 and the span id 16 hex digits,
    /// neither of them all zeros.
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>, trace_flags: u8) -> Option<Self> {
        let trace_id = trace_id.into().to_ascii_lowercase();
        let span_id = span_id.into().to_ascii_lowercase();
        if !is_valid_id(&trace_id, 32) || !is_valid_id(&span_id, 16) {
            return None;
        }
        Some(Self {
            trace_id,
            span_id,
            trace_flags,
        })
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    pub fn trace_flags(&self) -> u8 {
        self.trace_flags
    }

    pub fn is_sampled(&self) -> bool {
        self.trace_flags & 0x01 == 0x01
    }

    /// Fields merged into a record's extra map
    pub fn to_context(&self) -> LogContext {
        LogContext::new()
            .with_field(TRACE_ID_KEY, self.trace_id.as_str())
            .with_field(SPAN_ID_KEY, self.span_id.as_str())
            .with_field(TRACE_FLAGS_KEY, self.trace_flags as i64)
    }
}

fn is_valid_id(id: &str, len: usize) -> bool {
    id.len() == len && id.bytes().all(|b| b.is_ascii_hexdigit()) && id.bytes().any(|b| b != b'0')
}

/// Source of the currently active span
///
/// Implementations must be cheap and must not block. The logger also
/// guards every call with `catch_unwind`, so a panicking provider degrades
/// to "no context".
pub trait TraceContextProvider: Send + Sync {
    fn current_context(&self) -> Option<TraceContext>;
}

impl<F> TraceContextProvider for F
where
    F: Fn() -> Option<TraceContext> + Send + Sync,
{
    fn current_context(&self) -> Option<TraceContext> {
        self()
    }
}

/// Provider for services without tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTraceProvider;

impl TraceContextProvider for NoopTraceProvider {
    fn current_context(&self) -> Option<TraceContext> {
        None
    }
}

thread_local! {
    static SCOPED_TRACES: RefCell<Vec<TraceContext>> = const { RefCell::new(Vec::new()) };
}

/// Thread-local span stack
///
/// ```
/// use service_logger::core::{ScopedTraceProvider, TraceContext, TraceContextProvider};
///
/// let provider = ScopedTraceProvider;
/// let ctx = TraceContext::new("4bf92f3577b34da6a3ce929d0e0e4736", "00f067aa0ba902b7", 1).unwrap();
/// {
///     let _guard = ScopedTraceProvider::enter(ctx.clone());
///     assert_eq!(provider.current_context(), Some(ctx));
/// }
/// assert_eq!(provider.current_context(), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedTraceProvider;

impl ScopedTraceProvider {
    /// Make `context` the active span on this thread until the guard drops
    #[must_use = "the span is exited when the guard is dropped"]
    pub fn enter(context: TraceContext) -> TraceGuard {
        SCOPED_TRACES.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(context);
            TraceGuard {
                depth: stack.len(),
                _not_send: PhantomData,
            }
        })
    }
}

impl TraceContextProvider for ScopedTraceProvider {
    fn current_context(&self) -> Option<TraceContext> {
        SCOPED_TRACES
            .try_with(|stack| stack.try_borrow().ok().and_then(|s| s.last().cloned()))
            .ok()
            .flatten()
    }
}

/// RAII guard returned by [`ScopedTraceProvider::enter`]
///
/// Dropping it restores the span that was active before `enter`.
pub struct TraceGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        let _ = SCOPED_TRACES.try_with(|stack| {
            if let Ok(mut stack) = stack.try_borrow_mut() {
                stack.truncate(self.depth.saturating_sub(1));
            }
        });
    }
}

#[cfg(feature = "opentelemetry")]
mod otel {
    use super::{TraceContext, TraceContextProvider};
    use opentelemetry::trace::TraceContextExt;

    /// Reads the span of the current OpenTelemetry context
    #[derive(Debug, Clone, Copy, Default)]
    pub struct OpenTelemetryTraceProvider;

    impl TraceContextProvider for OpenTelemetryTraceProvider {
        fn current_context(&self) -> Option<TraceContext> {
            let cx = opentelemetry::Context::current();
            let span = cx.span();
            let span_context = span.span_context();
            if !span_context.is_valid() {
                return None;
            }
            TraceContext::new(
                span_context.trace_id().to_string(),
                span_context.span_id().to_string(),
                span_context.trace_flags().to_u8(),
            )
        }
    }

}

#[cfg(feature = "opentelemetry")]
pub use otel::OpenTelemetryTraceProvider;
