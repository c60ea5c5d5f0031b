//! Post-rotation pass: enforces the backup count and age limits, then compresses
//! what survives.

use super::backups::{BackupInfo, list_backups};
use super::compress::compress_file;
use super::format_size;
use crate::config::RotationPolicy;
use crate::internal;
use chrono::{DateTime, Local, TimeDelta};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// What one retention pass did.
#[derive(Debug, Default)]
pub struct RetentionResult {
    /// Backups deleted for exceeding the count or age limit.
    pub removed: Vec<PathBuf>,
    /// Backups that were gzipped (paths of the new `.gz` files).
    pub compressed: Vec<PathBuf>,
    /// Bytes reclaimed by compression.
    pub compressed_saved: u64,
    /// Files that could not be processed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl RetentionResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.compressed.is_empty() && self.failed.is_empty()
    }
}

/// Runs the count, age, and compression rules against the backups of `active`.
///
/// A backup present both plain and as `.gz` (an interrupted compression) counts once
/// toward `max_backups`.
///
/// # Errors
/// Only listing the directory can fail; per-file failures are collected in
/// [`RetentionResult::failed`].
pub fn apply_retention(
    active: &Path,
    policy: &RotationPolicy,
    now: DateTime<Local>,
) -> Result<RetentionResult, crate::Error> {
    let mut result = RetentionResult::default();
    let backups = list_backups(active)?;
    if backups.is_empty() {
        return Ok(result);
    }

    let mut remaining: Vec<BackupInfo> = Vec::with_capacity(backups.len());
    let mut doomed: Vec<BackupInfo> = Vec::new();

    if policy.max_backups > 0 {
        let mut kept: HashSet<String> = HashSet::new();
        for backup in backups {
            let key = uncompressed_name(&backup.path);
            if kept.contains(&key) || kept.len() < policy.max_backups {
                kept.insert(key);
                remaining.push(backup);
            } else {
                doomed.push(backup);
            }
        }
    } else {
        remaining = backups;
    }

    // An age too large for chrono's range leaves nothing old enough to expire.
    if policy.max_age > 0
        && let Some(cutoff) = TimeDelta::try_days(i64::from(policy.max_age))
            .and_then(|age| now.checked_sub_signed(age))
    {
        let (expired, fresh): (Vec<_>, Vec<_>) =
            remaining.into_iter().partition(|b| b.rotated_at < cutoff);
        doomed.extend(expired);
        remaining = fresh;
    }

    for backup in doomed {
        internal::debug("RETENTION", &format!("Removing: {}", backup.path.display()));
        match fs::remove_file(&backup.path) {
            Ok(()) => result.removed.push(backup.path),
            Err(e) => {
                internal::warn(
                    "RETENTION",
                    &format!("Failed to remove {}: {e}", backup.path.display()),
                );
                result.failed.push((backup.path, e.to_string()));
            }
        }
    }

    if policy.compress {
        for backup in remaining.into_iter().filter(|b| !b.compressed) {
            match compress_file(&backup.path) {
                Ok((gz_path, saved)) => {
                    internal::debug(
                        "RETENTION",
                        &format!("Compressed {} ({} saved)", gz_path.display(), format_size(saved)),
                    );
                    result.compressed.push(gz_path);
                    result.compressed_saved += saved;
                }
                Err(e) => {
                    internal::warn(
                        "RETENTION",
                        &format!("Failed to compress {}: {e}", backup.path.display()),
                    );
                    result.failed.push((backup.path, e.to_string()));
                }
            }
        }
    }

    Ok(result)
}

fn uncompressed_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(super::COMPRESS_SUFFIX)
        .map_or_else(|| name.clone(), ToString::to_string)
}
