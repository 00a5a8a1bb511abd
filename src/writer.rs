//! Atomic write-via-temp-then-rename writer.
//!
//! The writer owns a uniquely named temp file in the same directory as the
//! final path, so the closing rename stays on one filesystem. Until `close`
//! succeeds the final path is untouched; on any failure the temp file is
//! removed (best-effort) and the first error seen is returned. Observers of
//! the final path therefore see either the prior content or the complete new
//! content, never a partial write.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::{Error, Result};
use crate::file::parent_dir;
use crate::options::Options;
use crate::temp::create_temp_file;

/// Open an atomic writer targeting `path`.
///
/// Allocates a temp sibling (`<file_name>_<random>`) next to the final path
/// via [`create_temp_file`], so a missing parent directory is created and the
/// temp file carries `opts.file_mode`.
pub fn open_file_writer(path: impl AsRef<Path>, opts: Options) -> Result<FileWriter> {
    let path = path.as_ref();
    let file_name = path.file_name().ok_or_else(|| {
        Error::io(
            "open writer",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let pattern = format!("{}_*", file_name.to_string_lossy());
    let temp = create_temp_file(parent_dir(path), &pattern, opts)?;
    debug!(dest = %path.display(), temp = %temp.path().display(), "opened atomic writer");
    Ok(FileWriter {
        final_path: path.to_path_buf(),
        temp,
        first_err: None,
    })
}

/// Handle returned by [`open_file_writer`].
///
/// Write errors are returned to the caller and also recorded as the writer's
/// sticky first error; later writes are still attempted, and the first error
/// wins at [`close`](FileWriter::close). Dropping an unclosed writer discards
/// the temp file and leaves the final path untouched.
#[derive(Debug)]
pub struct FileWriter {
    final_path: PathBuf,
    temp: NamedTempFile,
    first_err: Option<io::Error>,
}

impl FileWriter {
    /// The final path this writer publishes to on a clean close.
    pub fn path(&self) -> &Path {
        &self.final_path
    }

    /// Write at the given byte offset without moving the file cursor.
    pub fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        #[cfg(unix)]
        let res = {
            use std::os::unix::fs::FileExt;
            self.temp.as_file().write_at(buf, offset)
        };
        #[cfg(windows)]
        let res = {
            use std::os::windows::fs::FileExt;
            self.temp.as_file().seek_write(buf, offset)
        };
        match res {
            Ok(n) => Ok(n),
            Err(e) => {
                self.record(&e);
                Err(e)
            }
        }
    }

    /// Finish the write: fsync, close and rename the temp file onto the
    /// final path.
    ///
    /// Error precedence is sticky write error, then fsync error, then rename
    /// error; the first present wins and the temp file is deleted without
    /// touching the final path. (`File` cannot report close errors through
    /// drop in Rust, so the close leg of the chain is absorbed by the fsync.)
    pub fn close(mut self) -> Result<()> {
        let mut err = self.first_err.take();
        if let Err(e) = self.temp.as_file().sync_all() {
            err.get_or_insert(e);
        }
        if let Some(e) = err {
            // Dropping the temp guard removes the file; the final path is
            // untouched.
            return Err(Error::io("write", &self.final_path, e));
        }

        match self.temp.persist(&self.final_path) {
            Ok(file) => {
                drop(file);
                // Persist the rename itself; never turns success into failure.
                #[cfg(unix)]
                if let Err(e) = fsync_dir(parent_dir(&self.final_path)) {
                    warn!(
                        dir = %parent_dir(&self.final_path).display(),
                        error = %e,
                        "directory fsync after rename failed",
                    );
                }
                debug!(dest = %self.final_path.display(), "published atomic write");
                Ok(())
            }
            Err(e) => {
                let err = Error::io("rename temp file", &self.final_path, e.error);
                // Dropping the returned guard removes the temp file.
                drop(e.file);
                Err(err)
            }
        }
    }

    fn record(&mut self, e: &io::Error) {
        if self.first_err.is_none() {
            // io::Error is not Clone; keep the kind and message.
            self.first_err = Some(io::Error::new(e.kind(), e.to_string()));
        }
    }
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.temp.as_file_mut().write(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                self.record(&e);
                Err(e)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.temp.as_file_mut().flush() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.record(&e);
                Err(e)
            }
        }
    }
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}
