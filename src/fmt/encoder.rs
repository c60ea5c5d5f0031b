//! Tab-separated console lines: `timestamp  LEVEL  caller  message  {fields}`.
//!
//! One encoder is shared by all tiers of a logger, so a record that lands in
//! several files is byte-identical in each of them.

use super::Field;
use crate::config::DEFAULT_TIME_FORMAT;
use crate::internal;
use crate::output::LogRecord;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEncoder {
    time_format: String,
}

impl Default for ConsoleEncoder {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl ConsoleEncoder {
    /// An invalid strftime layout would fail on every line, so it is replaced by the
    /// default up front.
    #[must_use]
    pub fn new(time_format: &str) -> Self {
        if time_format.is_empty() {
            return Self::default();
        }
        if StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error)) {
            internal::warn(
                "ENCODER",
                &format!("Invalid time format '{time_format}', using '{DEFAULT_TIME_FORMAT}'"),
            );
            return Self::default();
        }
        Self {
            time_format: time_format.to_string(),
        }
    }

    #[must_use]
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Renders one newline-terminated line.
    #[must_use]
    pub fn encode(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(64 + record.message.len());

        let _ = write!(line, "{}", record.time.format(&self.time_format));
        line.push('\t');
        line.push_str(record.level.as_capital_str());
        line.push('\t');
        let _ = write!(line, "{}:{}", trim_caller(record.caller.file()), record.caller.line());
        line.push('\t');
        line.push_str(&record.message);

        if !record.fields.is_empty() {
            line.push('\t');
            encode_fields(&mut line, &record.fields);
        }

        line.push('\n');
        line
    }
}

/// Fields are written in insertion order as a compact JSON object.
fn encode_fields(line: &mut String, fields: &[Field]) {
    line.push('{');
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        // Serializing a str or Value into a String cannot fail.
        line.push_str(&serde_json::to_string(&field.key).unwrap_or_default());
        line.push(':');
        line.push_str(&serde_json::to_string(&field.value).unwrap_or_default());
    }
    line.push('}');
}

/// Keeps the last directory and the file name of a source path (`src/main.rs`),
/// which is enough to locate a call site without leaking absolute build paths.
#[must_use]
pub fn trim_caller(file: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == '\\';
    let Some(last) = file.rfind(is_sep) else {
        return file;
    };
    file[..last]
        .rfind(is_sep)
        .map_or(file, |prev| &file[prev + 1..])
}
