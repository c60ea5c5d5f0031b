//! The active log file of one tier.

use super::backups::backup_path;
use super::format_size;
use super::retention::apply_retention;
use crate::config::RotationPolicy;
use crate::internal;
use chrono::{DateTime, DurationRound, Local, TimeDelta};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Creates `dir` and its parents with mode `0o755` on Unix. An existing directory is fine;
/// an existing regular file at that path is an error.
pub(crate) fn create_log_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

#[derive(Debug, Default)]
struct State {
    /// Opened lazily on the first write.
    file: Option<File>,
    size: u64,
    /// Millisecond timestamp of the last backup name this writer produced.
    last_backup: Option<DateTime<Local>>,
}

/// A log file that rolls over to a timestamped backup when it reaches its size limit.
///
/// Every operation takes an internal lock, so one instance can be shared across threads.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    max_bytes: u64,
    state: Mutex<State>,
    /// Serializes retention passes so two rotations never compress the same backup.
    retention: Mutex<()>,
}

impl RotatingFile {
    /// Nothing touches the filesystem until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            max_bytes: policy.max_size_bytes(),
            policy,
            state: Mutex::new(State::default()),
            retention: Mutex::new(()),
        }
    }

    /// Overrides the size limit derived from the policy's megabytes.
    #[must_use]
    pub fn max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes.max(1);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Size of the active file as tracked by this writer.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.lock_state().size
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `buf` as one unit, rotating first if it would not fit.
    ///
    /// # Errors
    /// A buffer longer than the size limit is rejected; otherwise I/O errors from
    /// opening, renaming, or writing.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write length {len} exceeds maximum file size {}",
                    self.max_bytes
                ),
            ));
        }

        let rotated = {
            let mut state = self.lock_state();
            let mut rotated = false;
            if state.file.is_none() {
                rotated = self.open_existing_or_new(&mut state, len)?;
            }
            if state.size + len > self.max_bytes {
                self.open_new(&mut state)?;
                rotated = true;
            }
            let Some(file) = state.file.as_mut() else {
                return Err(io::Error::other("log file is not open"));
            };
            file.write_all(buf)?;
            state.size += len;
            rotated
        };

        if rotated {
            self.run_retention();
        }
        Ok(buf.len())
    }

    /// Forces a rollover regardless of the current size.
    ///
    /// # Errors
    /// I/O errors from renaming the active file or creating the new one.
    pub fn rotate(&self) -> io::Result<()> {
        {
            let mut state = self.lock_state();
            self.open_new(&mut state)?;
        }
        self.run_retention();
        Ok(())
    }

    /// # Errors
    /// I/O errors from the underlying file.
    pub fn flush(&self) -> io::Result<()> {
        match self.lock_state().file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Closes the active file; the next write reopens it.
    ///
    /// # Errors
    /// I/O errors from flushing before the close.
    pub fn close(&self) -> io::Result<()> {
        let mut state = self.lock_state();
        if let Some(mut file) = state.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    /// Reuses an existing file when the pending write still fits, otherwise rotates.
    /// Returns whether a rotation happened.
    fn open_existing_or_new(&self, state: &mut State, pending: u64) -> io::Result<bool> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.open_new(state)?;
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if metadata.len() + pending >= self.max_bytes {
            self.open_new(state)?;
            return Ok(true);
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        state.file = Some(file);
        state.size = metadata.len();
        Ok(false)
    }

    /// Moves any existing active file to a backup and starts an empty one with the
    /// same permissions.
    fn open_new(&self, state: &mut State) -> io::Result<()> {
        state.file = None;

        if let Some(dir) = self.path.parent() {
            create_log_dir(dir)?;
        }

        let previous = match fs::metadata(&self.path) {
            Ok(metadata) => {
                let now = Local::now();
                let mut at = now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now);
                if let Some(last) = state.last_backup
                    && at <= last
                {
                    at = last + TimeDelta::milliseconds(1);
                }
                let (backup, at) = backup_path(&self.path, at);
                state.last_backup = Some(at);
                fs::rename(&self.path, &backup)?;
                internal::info(
                    "ROTATE",
                    &format!(
                        "Rotated {} -> {} ({})",
                        self.path.display(),
                        backup.display(),
                        format_size(metadata.len())
                    ),
                );
                Some(metadata.permissions())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        if let Some(permissions) = previous {
            file.set_permissions(permissions)?;
        }

        state.file = Some(file);
        state.size = 0;
        Ok(())
    }

    fn run_retention(&self) {
        let policy = &self.policy;
        if policy.max_backups == 0 && policy.max_age == 0 && !policy.compress {
            return;
        }

        let _guard = self
            .retention
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = apply_retention(&self.path, policy, Local::now()) {
            internal::warn(
                "RETENTION",
                &format!("Retention failed for {}: {e}", self.path.display()),
            );
        }
    }
}

impl Drop for RotatingFile {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
