//! Tierlog's own diagnostics: directory creation, rotation, compression, plus the
//! write failures a log call never returns to its caller.
//!
//! Nothing is printed by default. A host that wants to observe these installs a
//! hook once with [`set_hook`]; `OnceLock` guarantees only the first hook sticks.

use crate::level::Level;
use std::sync::OnceLock;

/// One diagnostic event emitted by the library itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Subsystem that produced it (`WRITER`, `ROTATE`, `LOGGER`, ...).
    pub scope: &'static str,
    pub message: String,
}

type Hook = Box<dyn Fn(&Diagnostic) + Send + Sync>;

static HOOK: OnceLock<Hook> = OnceLock::new();

/// Installs the process-wide diagnostics hook.
///
/// Returns `false` if a hook was already installed; the existing one is kept.
pub fn set_hook(hook: impl Fn(&Diagnostic) + Send + Sync + 'static) -> bool {
    HOOK.set(Box::new(hook)).is_ok()
}

/// Whether anyone is listening. Hot paths use it to skip building messages.
#[must_use]
pub fn has_hook() -> bool {
    HOOK.get().is_some()
}

/// Calls before a hook is installed silently vanish.
fn emit(level: Level, scope: &'static str, msg: &str) {
    if let Some(hook) = HOOK.get() {
        hook(&Diagnostic {
            level,
            scope,
            message: msg.to_string(),
        });
    }
}

/// Startup and state-change details.
pub fn debug(scope: &'static str, msg: &str) {
    emit(Level::Debug, scope, msg);
}

/// Normal milestones, e.g. a file rotated.
pub fn info(scope: &'static str, msg: &str) {
    emit(Level::Info, scope, msg);
}

/// A backup that could not be compressed or removed.
pub fn warn(scope: &'static str, msg: &str) {
    emit(Level::Warn, scope, msg);
}

/// A record that never reached its file.
pub fn error(scope: &'static str, msg: &str) {
    emit(Level::Error, scope, msg);
}
