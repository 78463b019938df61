//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from many threads never interleave within a line
//! - Metrics stay exact under contention
//! - Trace scopes stay isolated per thread

use serde_json::Value;
use service_logger::appenders::{MemoryAppender, WriterAppender};
use service_logger::core::{
    Appender, LogChannel, LogContext, LogLevel, Logger, LoggerError, NoopTraceProvider, Result,
    ScopedTraceProvider, TraceContext,
};
use std::collections::HashSet;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

/// Cloneable in-memory writer shared with the test body
#[derive(Clone, Default)]
struct SharedBuffer(Arc<parking_lot::Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_concurrent_lines_are_whole() {
    let buffer = SharedBuffer::default();
    let logger = Arc::new(
        Logger::builder()
            .min_level(LogLevel::Debug)
            .appender(WriterAppender::new(buffer.clone()))
            .trace_provider(NoopTraceProvider)
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let channel = LogChannel::ALL[i % LogChannel::ALL.len()];
                    logger.log(
                        channel,
                        format!("thread {} message {}", t, i),
                        LogContext::new()
                            .with_field("thread", t)
                            .with_field("seq", i)
                            .with_field("payload", "x".repeat(i % 64)),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let bytes = buffer.0.lock().clone();
    let content = String::from_utf8(bytes).expect("utf-8 output");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut seen = HashSet::new();
    for line in lines {
        let record: Value = serde_json::from_str(line).expect("every line is a whole record");
        let thread = record["thread"].as_u64().expect("thread");
        let seq = record["seq"].as_u64().expect("seq");
        assert!(seen.insert((thread, seq)), "duplicate record");
    }

    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().dropped_count(), 0);
}

#[test]
fn test_filtered_channels_under_load() {
    let output = Arc::new(MemoryAppender::new());
    let logger = Arc::new(
        Logger::builder()
            .min_level(LogLevel::Warning)
            .shared_appender(output.clone())
            .trace_provider(NoopTraceProvider)
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.debug("noise", LogContext::new());
                    logger.http("request", LogContext::new());
                    logger.security("login attempt", LogContext::new().with_field("i", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    assert_eq!(output.len(), THREADS * PER_THREAD);
    assert!(output
        .records()
        .iter()
        .all(|r| r["log_type"] == "security" && r["log.level"] == "WARNING"));
}

/// Appender failing every other write
struct FlakyAppender {
    calls: AtomicUsize,
    written: MemoryAppender,
}

impl Appender for FlakyAppender {
    fn append(&self, record: &str) -> Result<()> {
        if self.calls.fetch_add(1, Ordering::Relaxed) % 2 == 1 {
            return Err(LoggerError::writer("disk full"));
        }
        self.written.append(record)
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[test]
fn test_write_failures_counted_exactly() {
    let appender = Arc::new(FlakyAppender {
        calls: AtomicUsize::new(0),
        written: MemoryAppender::new(),
    });
    let logger = Arc::new(
        Logger::builder()
            .shared_appender(appender.clone())
            .trace_provider(NoopTraceProvider)
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..100 {
                    logger.audit("event", LogContext::new());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let total = (THREADS * 100) as u64;
    let metrics = logger.metrics();
    assert_eq!(metrics.total_logged() + metrics.write_failures(), total);
    assert_eq!(metrics.write_failures(), total / 2);
    assert_eq!(appender.written.len() as u64, metrics.total_logged());
    assert!((metrics.drop_rate() - 50.0).abs() < 1e-9);
}

#[test]
fn test_trace_scopes_isolated_per_thread() {
    let output = Arc::new(MemoryAppender::new());
    let logger = Arc::new(
        Logger::builder()
            .shared_appender(output.clone())
            .trace_provider(ScopedTraceProvider)
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let trace_id = format!("{:032x}", t + 1);
                let span_id = format!("{:016x}", t + 1);
                let ctx = TraceContext::new(trace_id, span_id, 1).expect("valid ids");
                let _guard = ScopedTraceProvider::enter(ctx);
                for _ in 0..50 {
                    logger.info("in span", LogContext::new().with_field("thread", t));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    for record in output.records() {
        let thread = record["thread"].as_u64().expect("thread") as usize;
        assert_eq!(record["trace_id"], format!("{:032x}", thread + 1));
    }
}
