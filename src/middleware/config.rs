//! HTTP logging configuration

use serde::{Deserialize, Serialize};

pub const ENV_EXCLUDE_PATHS: &str = "LOG_EXCLUDE_PATHS";
pub const ENV_INCLUDE_HEADERS: &str = "LOG_INCLUDE_HEADERS";
pub const ENV_INCLUDE_BODY: &str = "LOG_INCLUDE_BODY";

pub const DEFAULT_EXCLUDE_PATHS: [&str; 4] = ["health", "metrics", "api/health", "api/metrics"];
pub const DEFAULT_SENSITIVE_HEADERS: [&str; 4] =
    ["authorization", "cookie", "x-api-key", "x-auth-token"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpLoggerConfig {
    /// Paths that are never logged; `*` matches any run of characters
    pub exclude_paths: Vec<String>,
    pub include_headers: bool,
    pub include_body: bool,
    /// Header names (case-insensitive) whose values are redacted
    pub sensitive_headers: Vec<String>,
}

impl Default for HttpLoggerConfig {
    fn default() -> Self {
        Self {
            exclude_paths: DEFAULT_EXCLUDE_PATHS.iter().map(|p| p.to_string()).collect(),
            include_headers: false,
            include_body: false,
            sensitive_headers: DEFAULT_SENSITIVE_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }
}

impl HttpLoggerConfig {
    #[must_use]
    pub fn with_exclude_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    #[must_use]
    pub fn with_body(mut self, include: bool) -> Self {
        self.include_body = include;
        self
    }

    /// Redact one more header in addition to the current set
    #[must_use]
    pub fn with_sensitive_header(mut self, name: impl Into<String>) -> Self {
        self.sensitive_headers.push(name.into().to_ascii_lowercase());
        self
    }

    /// Resolve from `LOG_EXCLUDE_PATHS`, `LOG_INCLUDE_HEADERS`, `LOG_INCLUDE_BODY`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(paths) = lookup(ENV_EXCLUDE_PATHS) {
            config.exclude_paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(value) = lookup(ENV_INCLUDE_HEADERS) {
            config.include_headers = parse_flag(&value);
        }
        if let Some(value) = lookup(ENV_INCLUDE_BODY) {
            config.include_body = parse_flag(&value);
        }
        config
    }

    pub fn is_sensitive_header(&self, name: &str) -> bool {
        self.sensitive_headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpLoggerConfig::default();
        assert_eq!(config.exclude_paths, vec!["health", "metrics", "api/health", "api/metrics"]);
        assert!(!config.include_headers);
        assert!(!config.include_body);
        assert!(config.is_sensitive_header("Authorization"));
        assert!(config.is_sensitive_header("X-API-KEY"));
        assert!(!config.is_sensitive_header("accept"));
    }

    #[test]
    fn test_from_lookup() {
        let config = HttpLoggerConfig::from_lookup(|key| match key {
            "LOG_EXCLUDE_PATHS" => Some("/status, internal/* ,".to_string()),
            "LOG_INCLUDE_HEADERS" => Some("TRUE".to_string()),
            "LOG_INCLUDE_BODY" => Some("0".to_string()),
            _ => None,
        });

        assert_eq!(config.exclude_paths, vec!["/status", "internal/*"]);
        assert!(config.include_headers);
        assert!(!config.include_body);
    }

    #[test]
    fn test_extra_sensitive_header() {
        let config = HttpLoggerConfig::default().with_sensitive_header("X-Session-Token");
        assert!(config.is_sensitive_header("x-session-token"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HttpLoggerConfig = serde_json::from_str(r#"{"include_body":true}"#).unwrap();
        assert!(config.include_body);
        assert_eq!(config.exclude_paths.len(), 4);
    }
}
