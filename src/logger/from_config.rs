//! Tiered construction: one rotating writer per active tier, all sharing one encoder.

use super::{Logger, LoggerBuilder};
use crate::config::{ConfigOption, LoggerConfig};
use crate::fmt::ConsoleEncoder;
use crate::internal;
use crate::output::build_writer;
use std::sync::Arc;

impl Logger {
    /// Builds a logger with one sink per active tier.
    ///
    /// Tiers are built in the order common, error, info; the first directory failure
    /// aborts and later tiers are not attempted.
    ///
    /// # Errors
    /// [`crate::Error::DirectoryCreationFailed`] when a tier directory cannot be
    /// created, [`crate::Error::NoSinksConfigured`] when no tier is active.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, crate::Error> {
        let encoder = Arc::new(ConsoleEncoder::new(config.effective_time_format()));
        let mut builder = LoggerBuilder::new();

        for tier in config.active_tiers() {
            let tier_config = config.tier(tier);
            let dir = tier_config.dir_path();
            let writer = build_writer(&dir, &tier_config.file, tier_config.stdout, &config.rotation)
                .map_err(|e| crate::Error::DirectoryCreationFailed {
                    tier,
                    source: Arc::new(e),
                })?;
            internal::debug(
                "LOGGER",
                &format!(
                    "Tier {tier} -> {} (>= {}, stdout={})",
                    writer.file().path().display(),
                    tier.floor(),
                    tier_config.stdout
                ),
            );
            builder = builder.tier(tier, Arc::clone(&encoder), writer);
        }

        if builder.output_count() == 0 {
            internal::warn("LOGGER", "No log tier configured");
            return Err(crate::Error::NoSinksConfigured);
        }

        Ok(builder.build())
    }

    /// Applies `options` in order to an empty config, then builds.
    ///
    /// # Errors
    /// Same as [`Logger::from_config`].
    pub fn from_options(options: impl IntoIterator<Item = ConfigOption>) -> Result<Self, crate::Error> {
        Self::from_config(&LoggerConfig::from_options(options))
    }
}
