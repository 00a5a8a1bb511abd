//! Recursive copy, move and tree walking.
//!
//! `copy` publishes atomically at the top level: a file goes through the
//! atomic writer, a directory is built inside a temp sibling and renamed into
//! place in one step. Files copied *inside* a tree build are not individually
//! atomic — only the final publish of the whole tree is.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::dir::remove_all;
use crate::errors::{Error, Result};
use crate::file::parent_dir;
use crate::options::Options;
use crate::temp::create_temp_dir;
use crate::writer::open_file_writer;

/// Copy a file or directory tree from `src` to `dst`.
///
/// Permission bits follow the source. For a directory, any failure at any
/// depth removes the partially built temp tree and returns the error; `dst`
/// is never left half-copied.
pub fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    let meta = fs::metadata(src).map_err(|e| Error::io("stat", src, e))?;
    if meta.is_dir() {
        copy_dir(src, dst, &meta)
    } else {
        copy_file(src, dst, &meta)
    }
}

/// Rename `from` to `to`. May fail across filesystems; [`move_path`] handles
/// that fallback.
pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let from = from.as_ref();
    fs::rename(from, to.as_ref()).map_err(|e| Error::io("rename", from, e))
}

/// Move `src` to `dst`: a direct rename when possible, otherwise copy and
/// remove the source.
///
/// The fallback is not atomic as a whole — a crash between the copy
/// succeeding and the source removal leaves both copies present.
pub fn move_path(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    match fs::rename(src, dst) {
        Ok(()) => {
            info!(src = %src.display(), dst = %dst.display(), "moved by rename");
            Ok(())
        }
        Err(e) => {
            warn!(
                src = %src.display(),
                error = %e,
                "rename failed; falling back to copy and remove",
            );
            copy_then_remove(src, dst)
        }
    }
}

fn copy_then_remove(src: &Path, dst: &Path) -> Result<()> {
    copy(src, dst)?;
    remove_all(src)
}

/// Walk a tree depth-first in pre-order, yielding each path with its
/// metadata, the root first.
///
/// The traversal is lazy: dropping the iterator halts it. Entries that fail
/// to stat and subtrees that fail to read are skipped silently — this is the
/// lenient tier, with no error channel. Symlink cycles are not guarded
/// against.
pub fn walk(root: impl AsRef<Path>) -> impl Iterator<Item = (PathBuf, fs::Metadata)> {
    WalkDir::new(root.as_ref())
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.metadata().ok().map(|meta| (entry.into_path(), meta)))
}

fn copy_file(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<()> {
    let mut reader = File::open(src).map_err(|e| Error::io("open", src, e))?;

    #[cfg(unix)]
    let opts = Options::new().with_file_mode(mode_bits(meta));
    #[cfg(not(unix))]
    let opts = {
        let _ = meta;
        Options::new()
    };

    let mut writer = open_file_writer(dst, opts)?;
    if let Err(e) = io::copy(&mut reader, &mut writer) {
        // Dropping the unclosed writer discards the temp file: a failed
        // stream never publishes a partial destination.
        return Err(Error::io("copy", src, e));
    }
    writer.close()
}

fn copy_dir(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<()> {
    let base = dst.file_name().ok_or_else(|| {
        Error::io(
            "copy",
            dst,
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"),
        )
    })?;
    let pattern = format!("{}_*", base.to_string_lossy());

    #[cfg(unix)]
    let opts = Options::new().with_dir_mode(mode_bits(meta));
    #[cfg(not(unix))]
    let opts = {
        let _ = meta;
        Options::new()
    };

    // Build the tree inside a temp sibling of dst; the guard removes the
    // whole tree if anything below fails.
    let temp = create_temp_dir(parent_dir(dst), &pattern, opts)?;
    for entry in fs::read_dir(src).map_err(|e| Error::io("open directory", src, e))? {
        let entry = entry.map_err(|e| Error::io("read directory", src, e))?;
        copy_tree(&entry.path(), &temp.path().join(entry.file_name()))?;
    }

    // Publish: detach the guard and rename the finished tree into place.
    let temp_path = temp.keep();
    match fs::rename(&temp_path, dst) {
        Ok(()) => {
            info!(src = %src.display(), dst = %dst.display(), "published directory copy");
            Ok(())
        }
        Err(e) => {
            if let Err(cleanup) = remove_all(&temp_path) {
                warn!(
                    temp = %temp_path.display(),
                    error = %cleanup,
                    "failed to remove temp tree after rename failure",
                );
            }
            Err(Error::io("rename temp directory", dst, e))
        }
    }
}

/// Non-atomic recursive copy used while building inside a temp tree.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(|e| Error::io("stat", src, e))?;
    if meta.is_dir() {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode_bits(&meta));
        }
        builder
            .create(dst)
            .map_err(|e| Error::io("create directory", dst, e))?;
        for entry in fs::read_dir(src).map_err(|e| Error::io("open directory", src, e))? {
            let entry = entry.map_err(|e| Error::io("read directory", src, e))?;
            copy_tree(&entry.path(), &dst.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        copy_tree_file(src, dst, &meta)
    }
}

fn copy_tree_file(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<()> {
    let mut reader = File::open(src).map_err(|e| Error::io("open", src, e))?;
    let mut oo = OpenOptions::new();
    oo.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        oo.mode(mode_bits(meta));
    }
    #[cfg(not(unix))]
    let _ = meta;
    let mut out = oo.open(dst).map_err(|e| Error::io("open", dst, e))?;
    io::copy(&mut reader, &mut out).map_err(|e| Error::io("copy", dst, e))?;
    out.sync_all().map_err(|e| Error::io("sync", dst, e))
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fallback_copies_then_removes_source_file() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("b.txt");
        fs::write(&src, "payload").unwrap();

        copy_then_remove(&src, &dst).unwrap();

        assert!(!src.exists(), "source should be removed");
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    }

    #[test]
    fn fallback_copies_then_removes_source_tree() {
        let td = tempdir().unwrap();
        let src = td.path().join("tree");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("one.txt"), "one").unwrap();
        fs::write(src.join("sub").join("two.txt"), "two").unwrap();
        let dst = td.path().join("moved");

        copy_then_remove(&src, &dst).unwrap();

        assert!(!src.exists(), "source tree should be removed");
        assert_eq!(fs::read_to_string(dst.join("one.txt")).unwrap(), "one");
        assert_eq!(
            fs::read_to_string(dst.join("sub").join("two.txt")).unwrap(),
            "two"
        );
    }

    #[test]
    fn walk_is_preorder_and_stops_early() {
        let td = tempdir().unwrap();
        let root = td.path().join("w");
        fs::create_dir_all(root.join("d1")).unwrap();
        fs::write(root.join("d1").join("f.txt"), "x").unwrap();

        let paths: Vec<PathBuf> = walk(&root).map(|(p, _)| p).collect();
        assert_eq!(paths[0], root, "root must come first");
        let dir_pos = paths.iter().position(|p| p == &root.join("d1")).unwrap();
        let file_pos = paths
            .iter()
            .position(|p| p == &root.join("d1").join("f.txt"))
            .unwrap();
        assert!(dir_pos < file_pos, "parents must precede children");

        // Early stop: consuming one entry of an arbitrarily deep tree.
        let first = walk(&root).next().unwrap();
        assert_eq!(first.0, root);
    }

    #[test]
    fn walk_of_missing_root_yields_nothing() {
        let td = tempdir().unwrap();
        assert_eq!(walk(td.path().join("ghost")).count(), 0);
    }
}
