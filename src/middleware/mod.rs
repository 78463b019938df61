//! HTTP observation middleware
//!
//! ```
//! use service_logger::middleware::{HttpLogger, HttpLoggerConfig, HttpRequest};
//! use service_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let output = Arc::new(MemoryAppender::new());
//! let logger = Arc::new(Logger::builder().shared_appender(output.clone()).build());
//! let http = HttpLogger::new(logger, HttpLoggerConfig::default());
//!
//! let status = http.handle(&HttpRequest::new("GET", "/api/orders"), |_req| 200u16);
//! assert_eq!(status, 200);
//! assert_eq!(output.records()[0]["message"], "HTTP GET api/orders - 200");
//!
//! http.handle(&HttpRequest::new("GET", "/health"), |_req| 200u16);
//! assert_eq!(output.len(), 1);
//! ```

pub mod config;
pub mod http_logger;
pub mod request;

pub use config::HttpLoggerConfig;
pub use http_logger::{channel_for_status, HttpLogger, BODY_PARSE_ERROR, REDACTED};
pub use request::{HttpRequest, HttpRequestInfo, ResponseStatus};
