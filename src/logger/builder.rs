//! Assembles a [`Logger`] from individual sinks. [`Logger::from_config`] drives this
//! for the tiered setup; hosts can also add their own [`Output`] implementations.

use super::Logger;
use crate::config::Tier;
use crate::fmt::{ConsoleEncoder, Field};
use crate::output::{Output, TierOutput, TierWriter};
use std::sync::Arc;

#[derive(Default)]
pub struct LoggerBuilder {
    outputs: Vec<Box<dyn Output>>,
    context: Vec<Field>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tier sink; its floor follows from `tier`.
    #[must_use]
    pub fn tier(self, tier: Tier, encoder: Arc<ConsoleEncoder>, writer: TierWriter) -> Self {
        self.output(TierOutput::new(tier, encoder, writer))
    }

    /// Any sink beyond the built-in tiers.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    /// A field attached to every record of the built logger.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.context.push(field);
        self
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            outputs: Arc::new(self.outputs),
            context: self.context,
        }
    }
}
