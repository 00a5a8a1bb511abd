//! Temporary file and directory creation.
//!
//! Unique-name generation is delegated to the `tempfile` crate. Patterns
//! follow the usual convention: the last `*` marks where the random component
//! goes (`"config_*.xml"`), and a pattern without `*` is used as a prefix.
//!
//! Both functions return RAII guards that delete the resource on drop;
//! callers that want it to outlive the guard call `keep()` on the result.

use std::io;
use std::path::Path;

use tempfile::{Builder, NamedTempFile, TempDir};
use tracing::debug;

use crate::dir::mkdir_all;
use crate::errors::{Error, Result};
use crate::options::Options;

/// Split a temp-name pattern at its last `*` into (prefix, suffix).
fn split_pattern(pattern: &str) -> (&str, &str) {
    match pattern.rfind('*') {
        Some(i) => (&pattern[..i], &pattern[i + 1..]),
        None => (pattern, ""),
    }
}

/// Create a uniquely named file in `dir` matching `pattern`.
///
/// If `dir` is missing it is created recursively with `opts.dir_mode` and the
/// creation retried exactly once. The file's permission bits are then set to
/// `opts.file_mode` — temp files are otherwise created with a restrictive
/// mode — and a chmod failure removes the file and returns the error.
pub fn create_temp_file(
    dir: impl AsRef<Path>,
    pattern: &str,
    opts: Options,
) -> Result<NamedTempFile> {
    let dir = dir.as_ref();
    let (prefix, suffix) = split_pattern(pattern);
    let build = || Builder::new().prefix(prefix).suffix(suffix).tempfile_in(dir);

    let file = match build() {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "temp directory missing; creating it");
            mkdir_all(dir, opts)?;
            build().map_err(|e| Error::io("create temp file", dir, e))?
        }
        Err(e) => return Err(Error::io("create temp file", dir, e)),
    };

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = file
            .as_file()
            .set_permissions(Permissions::from_mode(opts.file_mode))
        {
            // The guard drops here, removing the file.
            return Err(Error::io("chmod temp file", file.path(), e));
        }
    }

    Ok(file)
}

/// Create a uniquely named directory in `dir` matching `pattern`, with its
/// permission bits set to `opts.dir_mode`. A chmod failure removes the
/// directory and returns the error. Unlike [`create_temp_file`], a missing
/// `dir` is not created.
pub fn create_temp_dir(dir: impl AsRef<Path>, pattern: &str, opts: Options) -> Result<TempDir> {
    let dir = dir.as_ref();
    let (prefix, suffix) = split_pattern(pattern);
    let temp = Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempdir_in(dir)
        .map_err(|e| Error::io("create temp directory", dir, e))?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) =
            std::fs::set_permissions(temp.path(), Permissions::from_mode(opts.dir_mode))
        {
            // The guard drops here, removing the directory.
            return Err(Error::io("chmod temp directory", temp.path(), e));
        }
    }
    #[cfg(not(unix))]
    let _ = opts;

    Ok(temp)
}
