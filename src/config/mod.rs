//! Logger configuration: per-tier destinations, the shared rotation policy, and the
//! timestamp format, built up from options or loaded from TOML.
//!
//! An empty config is valid to construct but has no active tier, and the logger
//! refuses to build from it.

mod structs;

pub use structs::{DEFAULT_TIME_FORMAT, RotationPolicy, Tier, TierConfig};

use crate::internal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed to build a tiered logger.
///
/// Every field defaults to empty/zero so a partial TOML file only sets what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Debug-and-above stream.
    pub common: TierConfig,
    /// Info-and-above stream.
    pub info: TierConfig,
    /// Error-only stream.
    pub error: TierConfig,
    /// Applies to all three tiers.
    pub rotation: RotationPolicy,
    /// strftime layout; empty selects [`DEFAULT_TIME_FORMAT`].
    pub time_format: String,
}

/// One deferred change to a [`LoggerConfig`].
///
/// Options are applied in order, so a later option wins over an earlier one touching the same field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
    /// Destination of the Debug-and-above tier.
    CommonLog {
        dir: String,
        file: String,
        stdout: bool,
    },
    /// Destination of the Info-and-above tier.
    InfoLog {
        dir: String,
        file: String,
        stdout: bool,
    },
    /// Destination of the Error tier.
    ErrorLog {
        dir: String,
        file: String,
        stdout: bool,
    },
    /// Size, count, and age limits shared by every tier.
    Rotation(RotationPolicy),
    /// strftime layout for the timestamp column.
    TimeFormat(String),
}

impl ConfigOption {
    /// Writes the Debug-and-above tier to `dir/file`.
    #[must_use]
    pub fn common_log(dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        Self::CommonLog {
            dir: dir.into(),
            file: file.into(),
            stdout,
        }
    }

    /// Writes the Info-and-above tier to `dir/file`.
    #[must_use]
    pub fn info_log(dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        Self::InfoLog {
            dir: dir.into(),
            file: file.into(),
            stdout,
        }
    }

    /// Writes the Error tier to `dir/file`.
    #[must_use]
    pub fn error_log(dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        Self::ErrorLog {
            dir: dir.into(),
            file: file.into(),
            stdout,
        }
    }

    /// `max_size` in megabytes (0 means 100), `max_age` in days. Zero counts disable a limit.
    #[must_use]
    pub const fn rotation(max_size: u64, max_backups: usize, max_age: u32, compress: bool) -> Self {
        Self::Rotation(RotationPolicy::new(max_size, max_backups, max_age, compress))
    }

    /// strftime layout, e.g. `%Y-%m-%d %H:%M:%S%.3f`.
    #[must_use]
    pub fn time_format(format: impl Into<String>) -> Self {
        Self::TimeFormat(format.into())
    }

    /// Mutates `config` in place.
    pub fn apply_to(self, config: &mut LoggerConfig) {
        match self {
            Self::CommonLog { dir, file, stdout } => config.common = TierConfig { dir, file, stdout },
            Self::InfoLog { dir, file, stdout } => config.info = TierConfig { dir, file, stdout },
            Self::ErrorLog { dir, file, stdout } => config.error = TierConfig { dir, file, stdout },
            Self::Rotation(policy) => config.rotation = policy,
            Self::TimeFormat(format) => config.time_format = format,
        }
    }
}

impl LoggerConfig {
    /// Zero-valued config with every tier disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config by applying `options` in order to an empty one.
    #[must_use]
    pub fn from_options(options: impl IntoIterator<Item = ConfigOption>) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    /// Applies `options` in order on top of the current values.
    pub fn apply(&mut self, options: impl IntoIterator<Item = ConfigOption>) {
        for option in options {
            option.apply_to(self);
        }
    }

    /// Enables the Debug-and-above tier.
    #[must_use]
    pub fn common_log(mut self, dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        self.common = TierConfig::new(dir, file, stdout);
        self
    }

    /// Enables the Info-and-above tier.
    #[must_use]
    pub fn info_log(mut self, dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        self.info = TierConfig::new(dir, file, stdout);
        self
    }

    /// Enables the Error tier.
    #[must_use]
    pub fn error_log(mut self, dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        self.error = TierConfig::new(dir, file, stdout);
        self
    }

    /// Sets the rotation policy shared by all tiers.
    #[must_use]
    pub const fn rotation(
        mut self,
        max_size: u64,
        max_backups: usize,
        max_age: u32,
        compress: bool,
    ) -> Self {
        self.rotation = RotationPolicy::new(max_size, max_backups, max_age, compress);
        self
    }

    /// Overrides the default timestamp layout.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Config for one tier.
    #[must_use]
    pub const fn tier(&self, tier: Tier) -> &TierConfig {
        match tier {
            Tier::Common => &self.common,
            Tier::Info => &self.info,
            Tier::Error => &self.error,
        }
    }

    /// Tiers with both a directory and a file name, in build order.
    #[must_use]
    pub fn active_tiers(&self) -> Vec<Tier> {
        [Tier::Common, Tier::Error, Tier::Info]
            .into_iter()
            .filter(|tier| self.tier(*tier).is_active())
            .collect()
    }

    /// Configured layout, or the default when none was set.
    #[must_use]
    pub fn effective_time_format(&self) -> &str {
        if self.time_format.is_empty() {
            DEFAULT_TIME_FORMAT
        } else {
            &self.time_format
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigParse`] on syntax or type errors.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Loads from an explicit path. A missing file yields the empty config.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("Config file not found at {}, using defaults", path.display()),
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads from [`Self::default_path`].
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or parsing fails.
    pub fn load() -> Result<Self, crate::Error> {
        Self::load_from(&Self::default_path()?)
    }

    /// `<config dir>/tierlog/tierlog.toml`, e.g. `~/.config/tierlog/tierlog.toml` on Linux.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn default_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("tierlog").join("tierlog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }
}
