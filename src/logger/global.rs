//! The process-wide logger. Hosts that prefer passing a [`Logger`] around can ignore
//! this module and use [`Logger::from_config`] directly.

use super::Logger;
use crate::config::{ConfigOption, LoggerConfig};
use std::sync::OnceLock;

/// Caches the first initialization attempt, success or failure.
static GLOBAL: OnceLock<Result<Logger, crate::Error>> = OnceLock::new();

/// Builds and publishes the global logger on the first call only.
///
/// Concurrent callers block until the first attempt completes and all of them get its
/// result; later calls ignore their `config`. A failed first attempt is permanent.
///
/// # Errors
/// The error of the first attempt, see [`Logger::from_config`].
pub fn init(config: LoggerConfig) -> Result<&'static Logger, crate::Error> {
    GLOBAL
        .get_or_init(|| Logger::from_config(&config))
        .as_ref()
        .map_err(Clone::clone)
}

/// [`init`] from a list of options applied in order.
///
/// # Errors
/// The error of the first attempt, see [`Logger::from_config`].
pub fn init_with(options: impl IntoIterator<Item = ConfigOption>) -> Result<&'static Logger, crate::Error> {
    init(LoggerConfig::from_options(options))
}

/// The published logger, if initialization has happened and succeeded.
#[must_use]
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get().and_then(|result| result.as_ref().ok())
}
