//! Appender trait for log output destinations

use super::error::Result;

/// Destination for formatted records
///
/// `append` receives one complete JSON line (including the trailing
/// newline) and must write it with a single write so that concurrent
/// callers never interleave partial lines.
pub trait Appender: Send + Sync {
    fn append(&self, record: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
