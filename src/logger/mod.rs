//! The logging façade: a logger fans each record out to every configured sink,
//! and each sink applies its own severity floor.

mod builder;
mod default;
mod from_config;
mod global;

pub use builder::LoggerBuilder;
pub use default::{DEFAULT_LOG_DIR, default_config, default_logger};
pub use global::{global, init, init_with};

use crate::fmt::Field;
use crate::internal;
use crate::level::Level;
use crate::output::{LogRecord, Output};
use chrono::Local;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Immutable after build; clones share the same sinks.
#[derive(Clone, Default)]
pub struct Logger {
    outputs: Arc<Vec<Box<dyn Output>>>,
    /// Fields attached to every record emitted through this handle.
    context: Vec<Field>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("outputs", &self.outputs.len())
            .field("context", &self.context)
            .finish()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// A handle writing to the same sinks with `fields` appended to every record.
    #[must_use]
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut context = self.context.clone();
        context.extend(fields);
        Self {
            outputs: Arc::clone(&self.outputs),
            context,
        }
    }

    /// Whether any sink would accept a record at `level`.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.outputs.iter().any(|output| output.enabled(level))
    }

    /// Core dispatch with an explicit call site.
    ///
    /// Write failures never reach the caller; they are reported to the internal
    /// diagnostics hook.
    pub fn log_at(
        &self,
        level: Level,
        caller: &'static Location<'static>,
        msg: impl Into<String>,
        fields: &[Field],
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut all_fields = Vec::with_capacity(self.context.len() + fields.len());
        all_fields.extend_from_slice(&self.context);
        all_fields.extend_from_slice(fields);

        let record = LogRecord {
            level,
            time: Local::now(),
            caller,
            message: msg.into(),
            fields: all_fields,
        };

        for output in self.outputs.iter().filter(|o| o.enabled(level)) {
            if let Err(e) = output.write(&record) {
                internal::error("LOGGER", &format!("Dropped {level} record: {e}"));
            }
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.log_at(level, Location::caller(), msg, fields);
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log_at(Level::Debug, Location::caller(), msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log_at(Level::Info, Location::caller(), msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log_at(Level::Warn, Location::caller(), msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log_at(Level::Error, Location::caller(), msg, fields);
    }

    /// Formatted variant: `logger.debugf(format_args!("{n} items"))`.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Debug, Location::caller(), args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Info, Location::caller(), args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Warn, Location::caller(), args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Error, Location::caller(), args);
    }

    /// Skips rendering the arguments when no sink wants the level.
    fn log_fmt(&self, level: Level, caller: &'static Location<'static>, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.log_at(level, caller, args.to_string(), &[]);
        }
    }

    /// Flushes every sink, continuing past failures.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn flush(&self) -> Result<(), crate::Error> {
        let mut first_err = None;
        for output in self.outputs.iter() {
            if let Err(e) = output.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Number of sinks records fan out to.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn context(&self) -> &[Field] {
        &self.context
    }
}
