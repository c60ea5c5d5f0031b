//! Where encoded records go. Each active tier becomes one [`TierOutput`]; the
//! [`Output`] trait lets hosts plug extra sinks into the same fan-out.

mod tier;
mod writer;

pub use tier::TierOutput;
pub use writer::{TierWriter, build_writer};

use crate::fmt::Field;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::panic::Location;

/// Everything a sink needs to render one log line.
///
/// The timestamp is taken once at emission so every tier writes the same instant.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub time: DateTime<Local>,
    /// Source location of the logging call.
    pub caller: &'static Location<'static>,
    pub message: String,
    pub fields: Vec<Field>,
}

/// `Send + Sync` so one logger can be shared across threads without an outer lock.
pub trait Output: Send + Sync {
    /// Writes the record if it passes this sink's own filter.
    ///
    /// # Errors
    /// I/O errors from the underlying file or console.
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;

    /// Lets the fan-out skip sinks that would discard the record anyway.
    fn enabled(&self, level: Level) -> bool {
        let _ = level;
        true
    }
}
