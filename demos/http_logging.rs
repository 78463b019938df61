//! HTTP middleware example
//!
//! Wraps a toy router with [`HttpLogger`] and shows status routing,
//! path exclusion, header redaction and async handlers.
//!
//! Run with: cargo run --example http_logging

use service_logger::prelude::*;
use std::time::Duration;

fn route(request: &HttpRequest) -> u16 {
    match (request.method(), request.path()) {
        ("GET", "/api/users") => 200,
        ("POST", "/api/orders") => 503,
        ("GET", "/health") => 200,
        _ => 404,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Service Logger - HTTP Logging Example ===\n");

    let logger = service_logger::initialize(LoggerConfig::new("storefront", "2.0.0", "demo"));
    let http = HttpLogger::from_global(
        HttpLoggerConfig::from_env()
            .with_headers(true)
            .with_body(true),
    )?;

    let requests = [
        HttpRequest::new("GET", "/api/users")
            .with_query("page", "2")
            .with_header("Authorization", "Bearer secret")
            .with_header("User-Agent", "curl/8.0")
            .with_client_ip("203.0.113.9")
            .with_user_id("usr-123"),
        HttpRequest::new("POST", "/api/orders").with_body(r#"{"sku":"A-1","qty":2}"#),
        HttpRequest::new("GET", "/api/unknown"),
        HttpRequest::new("GET", "/health"),
    ];

    println!("1. Synchronous handlers (the /health request is not logged):");
    for request in &requests {
        http.handle(request, route);
    }

    println!("\n2. Async handler:");
    let request = HttpRequest::new("GET", "/api/reports").with_body("not json");
    let status = http
        .handle_async(&request, |_req| async {
            tokio::time::sleep(Duration::from_millis(15)).await;
            200u16
        })
        .await;
    println!("   handler returned {}", status);

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
