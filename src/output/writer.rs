//! Builds the byte sink behind one tier: a rotating file, optionally mirrored to the console.

use crate::config::RotationPolicy;
use crate::internal;
use crate::rotation::{RotatingFile, create_log_dir};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

type Console = Mutex<Box<dyn Write + Send>>;

/// A rotating file plus an optional console copy of every line.
pub struct TierWriter {
    file: RotatingFile,
    console: Option<Console>,
}

impl fmt::Debug for TierWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TierWriter")
            .field("file", &self.file)
            .field("mirrored", &self.console.is_some())
            .finish()
    }
}

/// Ensures `dir` exists, then returns a writer for `dir/file_name` bounded by `policy`.
/// With `mirror`, every line is also written to stdout.
///
/// # Errors
/// Directory creation failures other than "already exists", including a regular
/// file sitting at `dir`.
pub fn build_writer(
    dir: &Path,
    file_name: &str,
    mirror: bool,
    policy: &RotationPolicy,
) -> io::Result<TierWriter> {
    if let Err(e) = create_log_dir(dir) {
        internal::error(
            "WRITER",
            &format!("Failed to create directory {}: {e}", dir.display()),
        );
        return Err(e);
    }
    internal::debug("WRITER", &format!("Log directory ready: {}", dir.display()));

    let writer = TierWriter::new(RotatingFile::new(dir.join(file_name), *policy));
    Ok(if mirror { writer.mirror_to(io::stdout()) } else { writer })
}

impl TierWriter {
    #[must_use]
    pub const fn new(file: RotatingFile) -> Self {
        Self {
            file,
            console: None,
        }
    }

    /// Copies every line to `console` after it reaches the file.
    #[must_use]
    pub fn mirror_to(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Some(Mutex::new(Box::new(console)));
        self
    }

    #[must_use]
    pub const fn file(&self) -> &RotatingFile {
        &self.file
    }

    #[must_use]
    pub const fn is_mirrored(&self) -> bool {
        self.console.is_some()
    }

    /// Writes one encoded line to the file, then the same bytes to the console.
    ///
    /// A file failure does not stop the console copy; the file error is returned first.
    ///
    /// # Errors
    /// The first I/O error from either destination.
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let file_result = self.file.write(line).map(|_| ());
        let console_result = self.console.as_ref().map_or(Ok(()), |console| {
            let mut console = console.lock().unwrap_or_else(PoisonError::into_inner);
            console.write_all(line)
        });
        file_result.and(console_result)
    }

    /// # Errors
    /// I/O errors from either destination.
    pub fn flush(&self) -> io::Result<()> {
        self.file.flush()?;
        if let Some(console) = &self.console {
            console
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush()?;
        }
        Ok(())
    }
}
