//! Appender over any `io::Write`

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::io::Write;

/// Serializes records into a shared writer (file, socket, buffer)
///
/// ```
/// use service_logger::appenders::WriterAppender;
/// use service_logger::Appender;
///
/// let appender = WriterAppender::new(Vec::new());
/// appender.append("{\"message\":\"hi\"}\n").unwrap();
/// let bytes = appender.into_inner();
/// assert_eq!(bytes, b"{\"message\":\"hi\"}\n");
/// ```
pub struct WriterAppender<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self::with_name(writer, "writer")
    }

    pub fn with_name(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&self, record: &str) -> Result<()> {
        self.writer.lock().write_all(record.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
