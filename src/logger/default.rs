//! Zero-configuration logger usable without any initialization: everything from
//! Debug up goes to `./logs/YYYYMMDD.log` and stdout.

use super::{Logger, LoggerBuilder};
use crate::config::{LoggerConfig, Tier};
use crate::fmt::ConsoleEncoder;
use crate::output::TierWriter;
use crate::rotation::RotatingFile;
use chrono::{Local, NaiveDate};
use std::io;
use std::sync::{Arc, LazyLock};

pub const DEFAULT_LOG_DIR: &str = "./logs";

static DEFAULT: LazyLock<Logger> = LazyLock::new(|| build_default(Local::now().date_naive()));

/// Built on first use. The file name uses the date of that first use for the rest of
/// the process. Independent of the global logger from [`super::init`].
#[must_use]
pub fn default_logger() -> &'static Logger {
    &DEFAULT
}

/// Config the default logger is built from: common tier only, mirrored, 1 MB files,
/// 5 backups, 30 days, uncompressed.
#[must_use]
pub fn default_config(date: NaiveDate) -> LoggerConfig {
    LoggerConfig::new()
        .common_log(DEFAULT_LOG_DIR, format!("{}.log", date.format("%Y%m%d")), true)
        .rotation(1, 5, 30, false)
}

/// Unlike [`Logger::from_config`] this never fails: the directory is created by the
/// rotating file on its first write instead of up front.
fn build_default(date: NaiveDate) -> Logger {
    let config = default_config(date);
    let tier = &config.common;
    let file = RotatingFile::new(tier.dir_path().join(&tier.file), config.rotation);
    let writer = TierWriter::new(file).mirror_to(io::stdout());
    let encoder = Arc::new(ConsoleEncoder::new(config.effective_time_format()));

    LoggerBuilder::new()
        .tier(Tier::Common, encoder, writer)
        .build()
}
