//! Property-based tests for service_logger using proptest

use proptest::prelude::*;
use service_logger::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
    ]
}

fn any_channel() -> impl Strategy<Value = LogChannel> {
    proptest::sample::select(LogChannel::ALL.to_vec())
}

fn test_formatter() -> RecordFormatter {
    let identity = LoggerConfig::new("prop", "0.1.0", "test").identity();
    RecordFormatter::with_hostname(identity, "prop-host")
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches the numeric severity
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 > level2, val1 > val2);
    }

    /// Lenient parsing ignores case and surrounding whitespace
    #[test]
    fn test_parse_lenient_case_insensitive(level in any_level(), upper in any::<bool>()) {
        let name = if upper {
            level.to_str().to_string()
        } else {
            level.to_str().to_lowercase()
        };
        prop_assert_eq!(LogLevel::parse_lenient(&format!("  {}  ", name)), level);
    }

    /// Lenient parsing never fails, whatever the input
    #[test]
    fn test_parse_lenient_total(input in ".{0,16}") {
        let level = LogLevel::parse_lenient(&input);
        prop_assert!(LogLevel::Debug <= level && level <= LogLevel::Error);
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    /// An event is written exactly when its channel severity reaches the minimum
    #[test]
    fn test_emitted_iff_at_or_above_min_level(channel in any_channel(), min in any_level()) {
        let output = Arc::new(MemoryAppender::new());
        let logger = Logger::builder()
            .min_level(min)
            .shared_appender(output.clone())
            .trace_provider(NoopTraceProvider)
            .build();

        logger.log(channel, "sample", LogContext::new());

        let expected = usize::from(channel.level() >= min);
        prop_assert_eq!(output.len(), expected);
        prop_assert_eq!(logger.metrics().total_logged(), expected as u64);
    }

    /// Caller context keys always survive, in insertion order, after the log type
    #[test]
    fn test_context_keys_preserved(
        keys in proptest::collection::vec("[a-z]{1,8}", 0..8),
        channel in any_channel(),
    ) {
        let output = Arc::new(MemoryAppender::new());
        let logger = Logger::builder()
            .min_level(LogLevel::Debug)
            .shared_appender(output.clone())
            .trace_provider(NoopTraceProvider)
            .build();

        let context: LogContext = keys.iter().map(|k| (k.clone(), k.len())).collect();
        let expected: Vec<String> = context.keys().map(str::to_string).collect();
        logger.log(channel, "sample", context);

        let record = &output.records()[0];
        for key in &expected {
            prop_assert!(record.get(key.as_str()).is_some());
        }
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// Any message stays on one line and parses back unchanged
    #[test]
    fn test_message_single_line(message in any::<String>()) {
        let line = test_formatter()
            .format(&LogEvent::new(LogLevel::Info, message.clone()))
            .unwrap();

        prop_assert_eq!(line.matches('\n').count(), 1);
        let record: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(record["message"].as_str().unwrap(), message.as_str());
    }

    /// A batch of N events yields N valid lines
    #[test]
    fn test_format_batch_line_count(messages in proptest::collection::vec("[ -~]{0,32}", 0..20)) {
        let events: Vec<LogEvent> = messages
            .iter()
            .map(|m| LogEvent::new(LogLevel::Warning, m.clone()))
            .collect();

        let batch = test_formatter().format_batch(&events).unwrap();
        let lines: Vec<&str> = batch.lines().collect();
        prop_assert_eq!(lines.len(), events.len());
        for line in lines {
            prop_assert!(serde_json::from_str::<serde_json::Value>(line).is_ok());
        }
    }

    /// Integer and finite float fields keep their value
    #[test]
    fn test_numeric_fields(int in any::<i64>(), float in -1.0e12f64..1.0e12) {
        let event = LogEvent::new(LogLevel::Info, "numbers").with_context(
            LogContext::new().with_field("int", int).with_field("float", float),
        );

        let record = test_formatter().to_record(&event).unwrap();
        prop_assert_eq!(record["int"].as_i64(), Some(int));
        prop_assert_eq!(record["float"].as_f64(), Some(float));
    }
}

// ============================================================================
// Trace Context Tests
// ============================================================================

proptest! {
    /// Well-formed hex identifiers are accepted and lowercased
    #[test]
    fn test_trace_context_accepts_hex(
        trace_id in "[0-9a-fA-F]{31}[1-9a-fA-F]",
        span_id in "[1-9a-fA-F][0-9a-fA-F]{15}",
        flags in any::<u8>(),
    ) {
        let ctx = TraceContext::new(trace_id.clone(), span_id.clone(), flags).unwrap();
        prop_assert_eq!(ctx.trace_id(), trace_id.to_ascii_lowercase());
        prop_assert_eq!(ctx.span_id(), span_id.to_ascii_lowercase());
        prop_assert_eq!(ctx.is_sampled(), flags & 1 == 1);
    }

    /// Identifiers of the wrong length are rejected
    #[test]
    fn test_trace_context_rejects_bad_length(trace_id in "[0-9a-f]{1,31}") {
        prop_assert!(TraceContext::new(trace_id, "00f067aa0ba902b7", 1).is_none());
    }
}
