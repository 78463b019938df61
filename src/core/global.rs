//! Process-wide logger access
//!
//! Services that pass an `Arc<Logger>` around do not need this module. It
//! exists for code paths that cannot be handed a logger, and keeps the
//! `initialize` / `get_instance` / `reset` lifecycle:
//!
//! - `initialize` installs a logger once; later calls return the installed one
//! - `get_instance` fails with [`LoggerError::NotInitialized`] before that
//! - `reset` clears the slot so tests can start from scratch

use super::config::LoggerConfig;
use super::error::{LoggerError, Result};
use super::logger::Logger;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static INSTANCE: Lazy<RwLock<Option<Arc<Logger>>>> = Lazy::new(|| RwLock::new(None));

/// Install a stdout logger built from `config` (first call wins)
pub fn initialize(config: LoggerConfig) -> Arc<Logger> {
    install_with(|| Logger::new(config))
}

/// Install a pre-built logger (first call wins)
///
/// If a logger is already installed, `logger` is dropped and the existing
/// instance is returned.
pub fn install(logger: Logger) -> Arc<Logger> {
    install_with(|| logger)
}

/// Initialize from `SERVICE_NAME`, `SERVICE_VERSION`, `APP_ENV`, `LOG_LEVEL`
pub fn init_from_env() -> Arc<Logger> {
    install_with(|| Logger::new(LoggerConfig::from_env()))
}

fn install_with<F>(build: F) -> Arc<Logger>
where
    F: FnOnce() -> Logger,
{
    if let Some(existing) = INSTANCE.read().as_ref() {
        return Arc::clone(existing);
    }

    let mut slot = INSTANCE.write();
    Arc::clone(slot.get_or_insert_with(|| Arc::new(build())))
}

/// The installed logger
pub fn get_instance() -> Result<Arc<Logger>> {
    INSTANCE
        .read()
        .as_ref()
        .map(Arc::clone)
        .ok_or(LoggerError::NotInitialized)
}

pub fn is_initialized() -> bool {
    INSTANCE.read().is_some()
}

/// Clear the installed logger; handles already obtained stay valid
pub fn reset() {
    INSTANCE.write().take();
}
