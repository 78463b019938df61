//! Logger configuration
//!
//! `LoggerConfig` is an immutable value resolved once at startup, either
//! constructed directly, deserialized with serde, or read from the process
//! environment with [`LoggerConfig::from_env`].

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

pub const ENV_SERVICE_NAME: &str = "SERVICE_NAME";
pub const ENV_SERVICE_VERSION: &str = "SERVICE_VERSION";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

const DEFAULT_SERVICE_NAME: &str = "app";
const DEFAULT_SERVICE_VERSION: &str = "1.0.0";
const DEFAULT_ENV: &str = "production";

/// Identity stamped on every record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceIdentity {
    pub name: String,
    pub version: String,
    pub env: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub service_name: String,
    pub service_version: String,
    pub env: String,
    #[serde(default)]
    pub level: LogLevel,
}

impl LoggerConfig {
    /// Create a config with the default `INFO` minimum level
    pub fn new(
        service_name: impl Into<String>,
        service_version: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            env: env.into(),
            level: LogLevel::Info,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the minimum level from a configuration string (see [`LogLevel::parse_lenient`])
    #[must_use]
    pub fn with_level_str(mut self, level: &str) -> Self {
        self.level = LogLevel::parse_lenient(level);
        self
    }

    /// Resolve from `SERVICE_NAME`, `SERVICE_VERSION`, `APP_ENV` and `LOG_LEVEL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            service_name: get(ENV_SERVICE_NAME, DEFAULT_SERVICE_NAME),
            service_version: get(ENV_SERVICE_VERSION, DEFAULT_SERVICE_VERSION),
            env: get(ENV_APP_ENV, DEFAULT_ENV),
            level: LogLevel::parse_lenient(&get(ENV_LOG_LEVEL, "INFO")),
        }
    }

    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity {
            name: self.service_name.clone(),
            version: self.service_version.clone(),
            env: self.env.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_new_uses_info_level() {
        let config = LoggerConfig::new("my-service", "1.0.0", "test");
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.service_name, "my-service");
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            ("SERVICE_NAME", "billing"),
            ("SERVICE_VERSION", "2.5.1"),
            ("APP_ENV", "staging"),
            ("LOG_LEVEL", "warn"),
        ]));

        assert_eq!(config.service_name, "billing");
        assert_eq!(config.service_version, "2.5.1");
        assert_eq!(config.env, "staging");
        assert_eq!(config.level, LogLevel::Warning);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = LoggerConfig::from_lookup(|_| None);

        assert_eq!(config.service_name, "app");
        assert_eq!(config.service_version, "1.0.0");
        assert_eq!(config.env, "production");
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = LoggerConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "loud")]));
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_deserialize_with_lenient_level() {
        let config: LoggerConfig = serde_json::from_str(
            r#"{"service_name":"svc","service_version":"1.2.3","env":"prod","level":"critical"}"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Error);

        let config: LoggerConfig =
            serde_json::from_str(r#"{"service_name":"svc","service_version":"1","env":"dev"}"#)
                .unwrap();
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_identity() {
        let identity = LoggerConfig::new("svc", "0.0.1-beta", "dev").identity();
        assert_eq!(identity.name, "svc");
        assert_eq!(identity.version, "0.0.1-beta");
        assert_eq!(identity.env, "dev");
    }
}
