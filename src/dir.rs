//! Directory creation and removal.

use std::fs;
use std::io;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::options::Options;

/// Create a single directory. Fails if the parent is missing.
pub fn mkdir(path: impl AsRef<Path>, opts: Options) -> Result<()> {
    let path = path.as_ref();
    builder(opts, false)
        .create(path)
        .map_err(|e| Error::io("create directory", path, e))
}

/// Create a directory and any missing ancestors. Succeeds if the path already
/// exists as a directory.
pub fn mkdir_all(path: impl AsRef<Path>, opts: Options) -> Result<()> {
    let path = path.as_ref();
    builder(opts, true)
        .create(path)
        .map_err(|e| Error::io("create directory", path, e))
}

fn builder(opts: Options, recursive: bool) -> fs::DirBuilder {
    let mut b = fs::DirBuilder::new();
    b.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        b.mode(opts.dir_mode);
    }
    #[cfg(not(unix))]
    let _ = opts;
    b
}

/// Remove a file or an empty directory.
pub fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let meta = fs::symlink_metadata(path).map_err(|e| Error::io("remove", path, e))?;
    let res = if meta.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    res.map_err(|e| Error::io("remove", path, e))
}

/// Remove a path and, for directories, everything beneath it. Succeeds if the
/// path does not exist.
pub fn remove_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io("remove", path, e)),
    };
    let res = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    res.map_err(|e| Error::io("remove", path, e))
}
