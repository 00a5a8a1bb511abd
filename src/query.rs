//! Path queries: existence, directory checks and directory listings.
//!
//! Every query comes in two tiers. The strict `try_*` form surfaces errors;
//! the bare-name form collapses any error into a safe default (`false` or an
//! empty listing) and never raises, mirroring `Path::try_exists` versus
//! `Path::exists` in std. The lenient tier is a deliberate contract for
//! callers that treat "can't tell" the same as "no" — callers that need the
//! distinction use the strict form.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::errors::{Error, Result};

/// Whether the path exists. A missing path is `Ok(false)`; any other stat
/// error propagates.
pub fn try_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io("stat", path, e)),
    }
}

/// Lenient [`try_exists`]: any error reads as `false`.
pub fn exists(path: impl AsRef<Path>) -> bool {
    try_exists(path).unwrap_or(false)
}

/// Whether the path is a directory. Follows symlinks; a missing path is an
/// error in this strict form.
pub fn try_is_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    fs::metadata(path)
        .map(|m| m.is_dir())
        .map_err(|e| Error::io("stat", path, e))
}

/// Lenient [`try_is_dir`]: any error reads as `false`.
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    try_is_dir(path).unwrap_or(false)
}

/// Whether the directory has no entries. Reads at most one entry: reaching
/// end-of-listing immediately means empty.
pub fn try_is_empty_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path).map_err(|e| Error::io("open directory", path, e))?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(Error::io("read directory", path, e)),
    }
}

/// Lenient [`try_is_empty_dir`]: any error reads as `false`.
pub fn is_empty_dir(path: impl AsRef<Path>) -> bool {
    try_is_empty_dir(path).unwrap_or(false)
}

/// Names of all entries in a directory, snapshot at call time.
pub fn try_read_dir_names(path: impl AsRef<Path>) -> Result<Vec<OsString>> {
    let path = path.as_ref();
    let mut names = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| Error::io("open directory", path, e))? {
        let entry = entry.map_err(|e| Error::io("read directory", path, e))?;
        names.push(entry.file_name());
    }
    Ok(names)
}

/// Lenient [`try_read_dir_names`]: any error reads as an empty listing.
pub fn read_dir_names(path: impl AsRef<Path>) -> Vec<OsString> {
    try_read_dir_names(path).unwrap_or_default()
}

/// Full directory entries, snapshot at call time.
pub fn try_read_dir_entries(path: impl AsRef<Path>) -> Result<Vec<fs::DirEntry>> {
    let path = path.as_ref();
    let mut list = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| Error::io("open directory", path, e))? {
        list.push(entry.map_err(|e| Error::io("read directory", path, e))?);
    }
    Ok(list)
}

/// Lenient [`try_read_dir_entries`]: any error reads as an empty listing.
pub fn read_dir_entries(path: impl AsRef<Path>) -> Vec<fs::DirEntry> {
    try_read_dir_entries(path).unwrap_or_default()
}

/// Entry names paired with their metadata, snapshot at call time.
pub fn try_read_dir_metadata(path: impl AsRef<Path>) -> Result<Vec<(OsString, fs::Metadata)>> {
    let path = path.as_ref();
    let mut list = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| Error::io("open directory", path, e))? {
        let entry = entry.map_err(|e| Error::io("read directory", path, e))?;
        let meta = entry
            .metadata()
            .map_err(|e| Error::io("stat", &entry.path(), e))?;
        list.push((entry.file_name(), meta));
    }
    Ok(list)
}

/// Lenient [`try_read_dir_metadata`]: any error reads as an empty listing.
pub fn read_dir_metadata(path: impl AsRef<Path>) -> Vec<(OsString, fs::Metadata)> {
    try_read_dir_metadata(path).unwrap_or_default()
}
