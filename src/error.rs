//! Unified error type for all tierlog operations.

use crate::config::Tier;
use std::sync::Arc;

/// Error type for tierlog operations.
///
/// `Clone` so a cached one-time initialization result can be handed to every caller;
/// I/O errors are shared behind an `Arc` for that reason.
#[derive(Debug, Clone)]
pub enum Error {
    /// A tier's output directory could not be created.
    DirectoryCreationFailed {
        /// Tier whose writer was being built.
        tier: Tier,
        /// Underlying filesystem error.
        source: Arc<std::io::Error>,
    },
    /// No tier had both a directory and a file name after applying the configuration.
    NoSinksConfigured,
    /// I/O error.
    Io(Arc<std::io::Error>),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Invalid log level string.
    InvalidLevel(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { tier, source } => {
                write!(f, "{tier} log directory creation failed: {source}")
            }
            Self::NoSinksConfigured => write!(f, "no log tier configured"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. } | Self::Io(source) => Some(source.as_ref()),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Arc::new(e))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<crate::level::ParseLevelError> for Error {
    fn from(e: crate::level::ParseLevelError) -> Self {
        Self::InvalidLevel(e.input().to_string())
    }
}
