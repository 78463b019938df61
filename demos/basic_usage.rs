//! Basic logger usage example
//!
//! Demonstrates the logging channels, context fields, error unpacking and
//! trace correlation, all written as JSON lines to stdout.
//!
//! Run with: cargo run --example basic_usage

use service_logger::prelude::*;
use service_logger::{audit, info};

#[derive(Debug, thiserror::Error)]
#[error("payment gateway timed out after {0}s")]
struct GatewayTimeout(u64);

fn main() -> Result<()> {
    println!("=== Service Logger - Basic Usage Example ===\n");

    // Identity comes from SERVICE_NAME, SERVICE_VERSION, APP_ENV and LOG_LEVEL
    let config = LoggerConfig::from_env().with_level(LogLevel::Debug);
    let logger = Logger::new(config);

    println!("1. Logging through each channel:");
    logger.debug("Cache warmed", LogContext::new().with_field("entries", 1_024));
    logger.info("Server started", LogContext::new().with_field("port", 8080));
    logger.warn("Slow query", LogContext::new().with_field("elapsed_ms", 812.4));
    logger.security(
        "Failed login",
        LogContext::new()
            .with_field("user", "alice")
            .with_field("attempts", 5),
    );
    logger.audit("Role granted", LogContext::new().with_field("role", "admin"));
    logger.http("GET api/users - 200", LogContext::new());

    println!("\n2. Error unpacking:");
    let err = GatewayTimeout(30);
    logger.error(
        "Charge failed",
        LogContext::new()
            .with_field("error", FieldValue::error(&err))
            .with_field("order_id", "ord-77"),
    );

    println!("\n3. Trace correlation:");
    if let Some(trace) =
        TraceContext::new("4bf92f3577b34da6a3ce929d0e0e4736", "00f067aa0ba902b7", 1)
    {
        let _guard = ScopedTraceProvider::enter(trace);
        logger.info("Inside a span", LogContext::new());
    }
    logger.info("Outside any span", LogContext::new());

    println!("\n4. Macros:");
    info!(logger, "Processed {} items", 100);
    audit!(logger, "User deleted"; "user_id" => "usr-999", "by" => "admin");

    logger.flush()?;

    let metrics = logger.metrics();
    println!(
        "\nLogged: {}, dropped: {}",
        metrics.total_logged(),
        metrics.dropped_count()
    );
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
