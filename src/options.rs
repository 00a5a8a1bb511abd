//! Permission-mode options and process-wide defaults.
//!
//! `Options` is a plain immutable value: construct one with [`Options::new`]
//! (which snapshots the process-wide defaults at that moment) and replace
//! individual fields with the `with_*` builders. Operations that create files
//! or directories take an `Options` by value.
//!
//! The process-wide defaults are global state. The setters are atomic, so
//! concurrent callers won't tear a value, but they are still a global,
//! unsynchronized mutation: threads relying on the defaults should treat
//! changing them as an init-time action, not something to race with.

use std::sync::atomic::{AtomicU32, Ordering};

/// Default permission bits for newly created files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;
/// Default permission bits for newly created directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

static FILE_MODE: AtomicU32 = AtomicU32::new(DEFAULT_FILE_MODE);
static DIR_MODE: AtomicU32 = AtomicU32::new(DEFAULT_DIR_MODE);

/// Replace the process-wide default file mode.
pub fn set_default_file_mode(mode: u32) {
    FILE_MODE.store(mode, Ordering::Relaxed);
}

/// Replace the process-wide default directory mode.
pub fn set_default_dir_mode(mode: u32) {
    DIR_MODE.store(mode, Ordering::Relaxed);
}

/// Current process-wide default file mode.
pub fn default_file_mode() -> u32 {
    FILE_MODE.load(Ordering::Relaxed)
}

/// Current process-wide default directory mode.
pub fn default_dir_mode() -> u32 {
    DIR_MODE.load(Ordering::Relaxed)
}

/// Permission modes applied by creating operations.
///
/// Modes are Unix permission bits; on non-Unix targets they are carried but
/// not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Mode for created files.
    pub file_mode: u32,
    /// Mode for created directories.
    pub dir_mode: u32,
}

impl Options {
    /// Snapshot the process-wide defaults. Later calls to the default-mode
    /// setters do not affect an already-built value.
    pub fn new() -> Self {
        Self {
            file_mode: default_file_mode(),
            dir_mode: default_dir_mode(),
        }
    }

    /// Replace the file mode.
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Replace the directory mode.
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
