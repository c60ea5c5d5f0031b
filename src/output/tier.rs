//! One severity-filtered stream: a floor, the shared encoder, and its writer.

use super::{LogRecord, Output, TierWriter};
use crate::config::Tier;
use crate::fmt::ConsoleEncoder;
use crate::level::Level;
use std::sync::Arc;

/// Sink for one tier.
#[derive(Debug)]
pub struct TierOutput {
    tier: Tier,
    floor: Level,
    encoder: Arc<ConsoleEncoder>,
    writer: TierWriter,
}

impl TierOutput {
    /// The floor comes from the tier: Debug for common, Info for info, Error for error.
    #[must_use]
    pub fn new(tier: Tier, encoder: Arc<ConsoleEncoder>, writer: TierWriter) -> Self {
        Self {
            tier,
            floor: tier.floor(),
            encoder,
            writer,
        }
    }

    /// Which stream this sink writes.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Lowest level written.
    #[must_use]
    pub const fn floor(&self) -> Level {
        self.floor
    }

    /// The file (and optional console) behind this tier.
    #[must_use]
    pub const fn writer(&self) -> &TierWriter {
        &self.writer
    }
}

impl Output for TierOutput {
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        if record.level < self.floor {
            return Ok(());
        }
        let line = self.encoder.encode(record);
        self.writer.write_line(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.writer.flush()?;
        Ok(())
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.floor
    }
}
