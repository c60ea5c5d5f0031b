//! Configuration struct definitions.

use crate::level::Level;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Timestamp layout used when no format is configured.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// The three severity-tiered streams a logger can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Everything from Debug up.
    Common,
    /// Info and above.
    Info,
    /// Errors only.
    Error,
}

impl Tier {
    /// Lowest level a record needs to reach this tier.
    #[must_use]
    pub const fn floor(self) -> Level {
        match self {
            Self::Common => Level::Debug,
            Self::Info => Level::Info,
            Self::Error => Level::Error,
        }
    }

    /// Lowercase name used in diagnostics and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where one tier writes. Empty `dir` or `file` leaves the tier disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Output directory, `~` is expanded.
    pub dir: String,
    /// File name inside `dir`.
    pub file: String,
    /// Mirror every record of this tier to stdout.
    pub stdout: bool,
}

impl TierConfig {
    /// Destination for one tier; `stdout` mirrors its lines to the console.
    #[must_use]
    pub fn new(dir: impl Into<String>, file: impl Into<String>, stdout: bool) -> Self {
        Self {
            dir: dir.into(),
            file: file.into(),
            stdout,
        }
    }

    /// A tier only produces output when both halves of its path are set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.dir.is_empty() && !self.file.is_empty()
    }

    /// Directory with a leading `~` resolved against the user's home.
    #[must_use]
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.dir).as_ref())
    }
}

/// Size, count, and age limits shared by every tier's rotating file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RotationPolicy {
    /// Megabytes before the active file is rolled over. 0 means 100.
    pub max_size: u64,
    /// Backups kept after rotation. 0 keeps all.
    pub max_backups: usize,
    /// Days a backup is retained. 0 disables age pruning.
    pub max_age: u32,
    /// Gzip backups after rotation.
    pub compress: bool,
}

impl RotationPolicy {
    /// Fallback when `max_size` is left at zero.
    pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

    #[must_use]
    pub const fn new(max_size: u64, max_backups: usize, max_age: u32, compress: bool) -> Self {
        Self {
            max_size,
            max_backups,
            max_age,
            compress,
        }
    }

    /// Size limit in bytes, with the zero fallback applied. Saturates at `u64::MAX`.
    #[must_use]
    pub const fn max_size_bytes(&self) -> u64 {
        let mb = if self.max_size == 0 {
            Self::DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size
        };
        mb.saturating_mul(1024 * 1024)
    }
}
