//! In-memory appender for tests and inspection

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use serde_json::Value;

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemoryAppender {
    lines: Mutex<Vec<String>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lines, each including its trailing newline
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Lines parsed back into JSON objects
    ///
    /// # Panics
    ///
    /// Panics if a stored line is not valid JSON.
    pub fn records(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .map(|line| serde_json::from_str(line).expect("appended record is valid JSON"))
            .collect()
    }

    /// All lines concatenated, as they would appear on stdout
    pub fn contents(&self) -> String {
        self.lines.lock().concat()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&self, record: &str) -> Result<()> {
        self.lines.lock().push(record.to_string());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
