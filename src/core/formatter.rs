//! Single-line JSON record formatting
//!
//! Every record starts with the reserved fields in a fixed order:
//!
//! ```text
//! @timestamp, log.level, service.name, service.version, env, host.name, message
//! ```
//!
//! Event context is merged on top, then extra (enrichment) fields. Merging is
//! last-write-wins, so a context key equal to a reserved key replaces the
//! reserved value while keeping its position.

use super::config::ServiceIdentity;
use super::error::{LoggerError, Result};
use super::log_event::LogEvent;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub const TIMESTAMP_KEY: &str = "@timestamp";
pub const LEVEL_KEY: &str = "log.level";
pub const SERVICE_NAME_KEY: &str = "service.name";
pub const SERVICE_VERSION_KEY: &str = "service.version";
pub const ENV_KEY: &str = "env";
pub const HOST_NAME_KEY: &str = "host.name";
pub const MESSAGE_KEY: &str = "message";

/// Reserved top-level keys, in output order
pub const RESERVED_KEYS: [&str; 7] = [
    TIMESTAMP_KEY,
    LEVEL_KEY,
    SERVICE_NAME_KEY,
    SERVICE_VERSION_KEY,
    ENV_KEY,
    HOST_NAME_KEY,
    MESSAGE_KEY,
];

const UNKNOWN_HOST: &str = "unknown";

/// ISO 8601 with milliseconds and a literal `Z`: `2025-01-08T10:30:45.123Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Best-effort host name lookup; never fails
///
/// Asks the OS first (`gethostname(2)`), then `HOSTNAME` / `COMPUTERNAME`,
/// then `/etc/hostname`.
pub fn resolve_hostname() -> String {
    let from_os =
        std::iter::once_with(|| gethostname::gethostname().to_string_lossy().into_owned());
    let from_env = ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok());
    let from_file =
        std::iter::once_with(|| std::fs::read_to_string("/etc/hostname").ok()).flatten();

    from_os
        .chain(from_env)
        .chain(from_file)
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

#[derive(Debug, Clone)]
pub struct RecordFormatter {
    identity: ServiceIdentity,
    hostname: String,
}

impl RecordFormatter {
    /// Create a formatter, resolving the host name once
    pub fn new(identity: ServiceIdentity) -> Self {
        Self::with_hostname(identity, resolve_hostname())
    }

    pub fn with_hostname(identity: ServiceIdentity, hostname: impl Into<String>) -> Self {
        Self {
            identity,
            hostname: hostname.into(),
        }
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Build the ordered JSON object for an event
    pub fn to_record(&self, event: &LogEvent) -> Result<Map<String, Value>> {
        let mut record = Map::new();
        record.insert(
            TIMESTAMP_KEY.to_string(),
            Value::String(format_timestamp(&event.timestamp)),
        );
        record.insert(
            LEVEL_KEY.to_string(),
            Value::String(event.level.to_str().to_string()),
        );
        record.insert(
            SERVICE_NAME_KEY.to_string(),
            Value::String(self.identity.name.clone()),
        );
        record.insert(
            SERVICE_VERSION_KEY.to_string(),
            Value::String(self.identity.version.clone()),
        );
        record.insert(ENV_KEY.to_string(), Value::String(self.identity.env.clone()));
        record.insert(HOST_NAME_KEY.to_string(), Value::String(self.hostname.clone()));
        record.insert(MESSAGE_KEY.to_string(), Value::String(event.message.clone()));

        for fields in [&event.context, &event.extra] {
            for (key, value) in fields.iter() {
                let value = value.to_json_value().map_err(|e| {
                    LoggerError::formatter("JSON", format!("field '{}': {}", key, e))
                })?;
                record.insert(key.to_string(), value);
            }
        }

        Ok(record)
    }

    /// Format one event as a JSON line terminated by `\n`
    ///
    /// Slashes and non-ASCII text are written unescaped and floats keep their
    /// fractional part (`2.0`). A value JSON cannot encode is a caller defect
    /// and is returned as [`LoggerError::FormatterError`].
    pub fn format(&self, event: &LogEvent) -> Result<String> {
        let record = self.to_record(event)?;
        let mut line = serde_json::to_string(&Value::Object(record))?;
        line.push('\n');
        Ok(line)
    }

    /// Format events in order, one line each
    pub fn format_batch(&self, events: &[LogEvent]) -> Result<String> {
        let mut out = String::new();
        for event in events {
            out.push_str(&self.format(event)?);
        }
        Ok(out)
    }
}
