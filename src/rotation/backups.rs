//! Naming and discovery of rotated backups.
//!
//! A backup of `app.log` is `app-2024-03-09T07-05-01.000.log`, optionally with a
//! trailing `.gz`. The timestamp in the name, not the file's mtime, decides its age,
//! so copying a log directory around does not reset retention.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp layout embedded in backup names; no `:` so it is valid on every filesystem.
pub const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// Extension appended to compressed backups.
pub const COMPRESS_SUFFIX: &str = ".gz";

/// One rotated file found next to the active log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub path: PathBuf,
    /// When the backup was rotated out, parsed from its name.
    pub rotated_at: DateTime<Local>,
    pub compressed: bool,
}

/// Splits `app.log` into (`app`, `.log`). A name without a dot has an empty extension.
pub(crate) fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Backup path for `active` rotated at `at`, plus the timestamp actually used. If that
/// name is taken (two rotations in the same millisecond), the timestamp is nudged
/// forward until it is free.
pub(crate) fn backup_path(active: &Path, at: DateTime<Local>) -> (PathBuf, DateTime<Local>) {
    let dir = active.parent().unwrap_or_else(|| Path::new("."));
    let file_name = active
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_name(&file_name);

    let mut at = at;
    loop {
        let candidate = dir.join(format!("{stem}-{}{ext}", at.format(BACKUP_TIME_FORMAT)));
        let gz = PathBuf::from(format!("{}{COMPRESS_SUFFIX}", candidate.display()));
        if !candidate.exists() && !gz.exists() {
            return (candidate, at);
        }
        at += chrono::Duration::milliseconds(1);
    }
}

fn backup_pattern(stem: &str, ext: &str) -> Option<Regex> {
    let pattern = format!(
        r"^{}-(\d{{4}}-\d{{2}}-\d{{2}}T\d{{2}}-\d{{2}}-\d{{2}}\.\d{{3}}){}({})?$",
        regex::escape(stem),
        regex::escape(ext),
        regex::escape(COMPRESS_SUFFIX),
    );
    Regex::new(&pattern).ok()
}

/// Lists backups belonging to `active`, newest first.
///
/// Files that merely share the directory (other tiers, unrelated names) are skipped.
///
/// # Errors
/// I/O errors from reading the directory.
pub fn list_backups(active: &Path) -> Result<Vec<BackupInfo>, crate::Error> {
    let dir = active.parent().unwrap_or_else(|| Path::new("."));
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let file_name = active
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_name(&file_name);
    let Some(pattern) = backup_pattern(stem, ext) else {
        return Ok(Vec::new());
    };

    let mut backups = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        let Some(rotated_at) = caps
            .get(1)
            .and_then(|m| NaiveDateTime::parse_from_str(m.as_str(), BACKUP_TIME_FORMAT).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        else {
            continue;
        };

        backups.push(BackupInfo {
            path: entry.path(),
            rotated_at,
            compressed: caps.get(2).is_some(),
        });
    }

    backups.sort_by(|a, b| b.rotated_at.cmp(&a.rotated_at));
    Ok(backups)
}
