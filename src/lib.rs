//! `tierlog` - severity-tiered file logging.
//!
//! Up to three log streams, each with its own file and console-mirroring flag:
//! - **common**: everything from Debug up
//! - **info**: Info and above
//! - **error**: Error only
//!
//! All tiers share one size/count/age rotation policy and one timestamp format.
//! A record is written to every tier whose floor it meets, so an error can land in
//! three files at once.
//!
//! # Example
//!
//! ```no_run
//! use tierlog::{Field, LoggerConfig};
//!
//! let config = LoggerConfig::new()
//!     .common_log("logs", "common.log", true)
//!     .info_log("logs", "info.log", false)
//!     .error_log("logs", "error.log", false)
//!     .rotation(10, 5, 30, true);
//!
//! let logger = tierlog::init(config)?;
//! logger.info("server started", &[Field::new("port", 8080)]);
//! logger.errorf(format_args!("lost {} connections", 3));
//! # Ok::<(), tierlog::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `tierlog` command-line binary

pub mod config;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;
pub mod rotation;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

pub use config::{ConfigOption, LoggerConfig, RotationPolicy, Tier, TierConfig};
pub use error::Error;
pub use fmt::Field;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, default_logger, global, init, init_with};
pub use output::{LogRecord, Output};

use std::panic::Location;

/// Records sent before a successful [`init`] are dropped.
#[track_caller]
pub fn log(level: Level, msg: &str, fields: &[Field]) {
    if let Some(logger) = global() {
        logger.log_at(level, Location::caller(), msg, fields);
    }
}

/// Debug record to the global logger.
#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    log(Level::Debug, msg, fields);
}

/// Info record to the global logger.
#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    log(Level::Info, msg, fields);
}

/// Warn record to the global logger.
#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    log(Level::Warn, msg, fields);
}

/// Error record to the global logger.
#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    log(Level::Error, msg, fields);
}
