//! Typed error definitions for filekit.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Every error carries the operation that was attempted and the path it was
//! attempted on, so callers never have to unwrap the source `io::Error` just
//! to find out what went wrong where.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{op} '{}': not found", .path.display())]
    NotFound {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': already exists", .path.display())]
    AlreadyExists {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': permission denied", .path.display())]
    PermissionDenied {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': is a directory", .path.display())]
    IsADirectory {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': not a directory", .path.display())]
    NotADirectory {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': cross-device rename not possible", .path.display())]
    CrossDevice {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

enum Class {
    NotFound,
    AlreadyExists,
    PermissionDenied,
    IsADirectory,
    NotADirectory,
    CrossDevice,
    Io,
}

/// Classify a raw OS error into one of the well-known failure modes.
/// `io::ErrorKind` covers the common cases; EXDEV / EISDIR / ENOTDIR are
/// detected via raw OS error codes (ERROR_NOT_SAME_DEVICE on Windows).
fn classify(e: &io::Error) -> Class {
    match e.kind() {
        io::ErrorKind::NotFound => return Class::NotFound,
        io::ErrorKind::AlreadyExists => return Class::AlreadyExists,
        io::ErrorKind::PermissionDenied => return Class::PermissionDenied,
        _ => {}
    }

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        match code {
            libc::EXDEV => return Class::CrossDevice,
            libc::EISDIR => return Class::IsADirectory,
            libc::ENOTDIR => return Class::NotADirectory,
            _ => {}
        }
        #[cfg(windows)]
        {
            // ERROR_NOT_SAME_DEVICE
            if code == 17 {
                return Class::CrossDevice;
            }
        }
    }

    Class::Io
}

impl Error {
    /// Wrap a raw I/O error with the failing operation and path.
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match classify(&source) {
            Class::NotFound => Error::NotFound { op, path, source },
            Class::AlreadyExists => Error::AlreadyExists { op, path, source },
            Class::PermissionDenied => Error::PermissionDenied { op, path, source },
            Class::IsADirectory => Error::IsADirectory { op, path, source },
            Class::NotADirectory => Error::NotADirectory { op, path, source },
            Class::CrossDevice => Error::CrossDevice { op, path, source },
            Class::Io => Error::Io { op, path, source },
        }
    }

    /// Path the failing operation was attempted on.
    pub fn path(&self) -> &Path {
        match self {
            Error::NotFound { path, .. }
            | Error::AlreadyExists { path, .. }
            | Error::PermissionDenied { path, .. }
            | Error::IsADirectory { path, .. }
            | Error::NotADirectory { path, .. }
            | Error::CrossDevice { path, .. }
            | Error::Io { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_cross_device(&self) -> bool {
        matches!(self, Error::CrossDevice { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_not_found() {
        let e = Error::io(
            "open",
            Path::new("/no/such/file"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(e.is_not_found());
        assert_eq!(e.path(), Path::new("/no/such/file"));
        let msg = e.to_string();
        assert!(msg.contains("open"), "message should name the op: {msg}");
        assert!(msg.contains("not found"), "unexpected message: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn classifies_exdev_as_cross_device() {
        let e = Error::io(
            "rename",
            Path::new("/mnt/a"),
            io::Error::from_raw_os_error(libc::EXDEV),
        );
        assert!(e.is_cross_device());
    }

    #[test]
    fn opaque_errors_pass_through() {
        let e = Error::io("sync", Path::new("f"), io::Error::other("disk on fire"));
        assert!(matches!(e, Error::Io { .. }));
        assert!(e.to_string().contains("disk on fire"));
    }
}
