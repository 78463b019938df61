//! Appender implementations

pub mod console;
pub mod memory;
pub mod writer;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use memory::MemoryAppender;
pub use writer::WriterAppender;

pub use crate::core::Appender;
