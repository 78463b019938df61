//! HTTP request/response logging
//!
//! [`HttpLogger`] wraps a handler, times it, and logs one record per
//! exchange. Status codes route the record: `>= 500` to the error channel,
//! `400..=499` to warn, everything else to http.

use super::config::HttpLoggerConfig;
use super::request::{HttpRequestInfo, ResponseStatus};
use crate::core::{global, FieldValue, LogChannel, LogContext, Logger, Result};
use indexmap::IndexMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const REDACTED: &str = "***REDACTED***";
pub const BODY_PARSE_ERROR: &str = "Could not parse request body";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const HTTP_METHOD_KEY: &str = "http.method";
pub const HTTP_PATH_KEY: &str = "http.path";
pub const HTTP_STATUS_CODE_KEY: &str = "http.status_code";
pub const HTTP_DURATION_MS_KEY: &str = "http.duration_ms";
pub const CLIENT_IP_KEY: &str = "client.ip";
pub const HTTP_USER_AGENT_KEY: &str = "http.user_agent";
pub const HTTP_QUERY_KEY: &str = "http.query";
pub const HTTP_HEADERS_KEY: &str = "http.headers";
pub const HTTP_BODY_KEY: &str = "http.body";
pub const USER_ID_KEY: &str = "user.id";

pub struct HttpLogger {
    logger: Arc<Logger>,
    config: HttpLoggerConfig,
    exclusions: Vec<String>,
}

impl HttpLogger {
    pub fn new(logger: Arc<Logger>, config: HttpLoggerConfig) -> Self {
        let exclusions = config
            .exclude_paths
            .iter()
            .map(|p| normalize_path(p))
            .collect();
        Self {
            logger,
            config,
            exclusions,
        }
    }

    /// Use the process-wide logger; fails if it was never initialized
    pub fn from_global(config: HttpLoggerConfig) -> Result<Self> {
        Ok(Self::new(global::get_instance()?, config))
    }

    pub fn config(&self) -> &HttpLoggerConfig {
        &self.config
    }

    /// Whether `path` matches an exclusion pattern
    pub fn should_skip(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.exclusions
            .iter()
            .any(|pattern| wildcard_match(pattern, &path))
    }

    /// Run `next` and log the exchange, returning its response unchanged
    pub fn handle<R, S, F>(&self, request: &R, next: F) -> S
    where
        R: HttpRequestInfo + ?Sized,
        S: ResponseStatus,
        F: FnOnce(&R) -> S,
    {
        if self.should_skip(request.path()) {
            return next(request);
        }

        let start = Instant::now();
        let response = next(request);
        self.record(request, response.status_code(), start.elapsed());
        response
    }

    /// Async form of [`handle`](Self::handle)
    pub async fn handle_async<'a, R, S, F, Fut>(&self, request: &'a R, next: F) -> S
    where
        R: HttpRequestInfo + ?Sized,
        S: ResponseStatus,
        F: FnOnce(&'a R) -> Fut,
        Fut: Future<Output = S>,
    {
        if self.should_skip(request.path()) {
            return next(request).await;
        }

        let start = Instant::now();
        let response = next(request).await;
        self.record(request, response.status_code(), start.elapsed());
        response
    }

    /// Log a finished exchange timed by the caller
    ///
    /// Exclusions are not checked here; framework glue calling `record`
    /// directly is expected to consult [`should_skip`](Self::should_skip).
    pub fn record<R>(&self, request: &R, status: u16, elapsed: Duration)
    where
        R: HttpRequestInfo + ?Sized,
    {
        let context = self.build_context(request, status, round_millis(elapsed));
        let message = format!(
            "HTTP {} {} - {}",
            request.method(),
            normalize_path(request.path()),
            status
        );

        self.logger.log(channel_for_status(status), message, context);
    }

    /// Context fields for one exchange
    pub fn build_context<R>(&self, request: &R, status: u16, duration_ms: f64) -> LogContext
    where
        R: HttpRequestInfo + ?Sized,
    {
        let mut context = LogContext::new()
            .with_field(HTTP_METHOD_KEY, request.method())
            .with_field(HTTP_PATH_KEY, normalize_path(request.path()))
            .with_field(HTTP_STATUS_CODE_KEY, status)
            .with_field(HTTP_DURATION_MS_KEY, duration_ms)
            .with_field(CLIENT_IP_KEY, request.client_ip())
            .with_field(HTTP_USER_AGENT_KEY, request.user_agent());

        let query = group_pairs(request.query());
        if !query.is_empty() {
            context.insert(HTTP_QUERY_KEY, query);
        }

        if self.config.include_headers {
            context.insert(HTTP_HEADERS_KEY, self.filter_headers(request.headers()));
        }

        if self.config.include_body {
            if let Some(body) = request.body().filter(|b| !b.is_empty()) {
                let content_type = request.header("content-type");
                context.insert(HTTP_BODY_KEY, parse_body(body, content_type.as_deref()));
            }
        }

        if let Some(user_id) = request.user_id() {
            context.insert(USER_ID_KEY, user_id);
        }

        context
    }

    /// Group headers by lowercase name, redacting sensitive values
    fn filter_headers(&self, headers: Vec<(String, String)>) -> LogContext {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for (name, value) in headers {
            grouped
                .entry(name.to_ascii_lowercase())
                .or_default()
                .push(value);
        }

        grouped
            .into_iter()
            .map(|(name, values)| {
                let values = if self.config.is_sensitive_header(&name) {
                    vec![REDACTED.to_string()]
                } else {
                    values
                };
                (name, FieldValue::from(values))
            })
            .collect()
    }
}

/// Channel a response with `status` is logged through
pub fn channel_for_status(status: u16) -> LogChannel {
    match status {
        500..=u16::MAX => LogChannel::Error,
        400..=499 => LogChannel::Warn,
        _ => LogChannel::Http,
    }
}

/// Milliseconds rounded to two decimals
fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

/// Strip leading and trailing `/`; the root path stays `/`
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Match `text` against `pattern`, where `*` matches any run of characters
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.as_bytes();
    let text = text.as_bytes();
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = backtrack {
            p = star_p + 1;
            t = star_t + 1;
            backtrack = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&b| b == b'*')
}

/// Group key/value pairs by key; a repeated key becomes a list of its values
fn group_pairs(pairs: Vec<(String, String)>) -> LogContext {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }

    grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                FieldValue::String(values.remove(0))
            } else {
                FieldValue::from(values)
            };
            (key, value)
        })
        .collect()
}

/// Decode a body by content type: form fields for url-encoded bodies, JSON
/// otherwise. Undecodable bodies become a placeholder object.
fn parse_body(body: &[u8], content_type: Option<&str>) -> FieldValue {
    let is_form = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false);

    let decoded = if is_form {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .ok()
            .map(|pairs| FieldValue::Map(group_pairs(pairs)))
    } else {
        serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .map(FieldValue::from)
    };

    decoded.unwrap_or_else(|| LogContext::new().with_field("_error", BODY_PARSE_ERROR).into())
}
