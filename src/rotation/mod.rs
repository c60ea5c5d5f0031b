//! Size-bounded log files with timestamped backups.
//!
//! The active file rolls over once the next write would push it past the size
//! limit; the retention pass then prunes backups by count and age and optionally
//! gzips the rest.

mod backups;
mod compress;
mod file;
mod retention;
mod size;

pub use backups::{BACKUP_TIME_FORMAT, BackupInfo, COMPRESS_SUFFIX, list_backups};
pub use file::RotatingFile;
pub use retention::{RetentionResult, apply_retention};
pub use size::format_size;
pub(crate) use file::create_log_dir;
