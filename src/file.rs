//! File open/read/write conveniences.
//!
//! Opening with a create flag transparently materializes missing parent
//! directories: one `mkdir_all` plus one retry, never a loop.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::dir::mkdir_all;
use crate::errors::{Error, Result};
use crate::options::Options;

/// Open flags rendered to `fs::OpenOptions` at open time.
///
/// A plain builder rather than `fs::OpenOptions` directly because the
/// mkdir-and-retry logic in [`open_file`] has to observe whether creation was
/// requested, and `OpenOptions` has no getters.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenFlags {
    read: bool,
    write: bool,
    append: bool,
    truncate: bool,
    create: bool,
    create_new: bool,
}

impl OpenFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    pub fn create_new(mut self, create_new: bool) -> Self {
        self.create_new = create_new;
        self
    }

    /// Whether any create flag is set.
    pub fn creates(&self) -> bool {
        self.create || self.create_new
    }

    fn open_options(&self, file_mode: u32) -> OpenOptions {
        let mut oo = OpenOptions::new();
        oo.read(self.read)
            .write(self.write)
            .append(self.append)
            .truncate(self.truncate)
            .create(self.create)
            .create_new(self.create_new);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            oo.mode(file_mode);
        }
        #[cfg(not(unix))]
        let _ = file_mode;
        oo
    }
}

/// Open a file with the given flags, applying `opts.file_mode` on creation.
///
/// If the open fails because a parent directory is missing and creation was
/// requested, the parent chain is created with `opts.dir_mode` and the open
/// retried exactly once; any other failure, including the retry's, is
/// returned as-is.
pub fn open_file(path: impl AsRef<Path>, flags: OpenFlags, opts: Options) -> Result<File> {
    let path = path.as_ref();
    let oo = flags.open_options(opts.file_mode);
    match oo.open(path) {
        Ok(f) => Ok(f),
        Err(e) if e.kind() == io::ErrorKind::NotFound && flags.creates() => {
            let parent = parent_dir(path);
            debug!(path = %path.display(), "open hit a missing parent; creating directories");
            mkdir_all(parent, opts)?;
            oo.open(path).map_err(|e| Error::io("open", path, e))
        }
        Err(e) => Err(Error::io("open", path, e)),
    }
}

/// Open a file read-only.
pub fn open(path: impl AsRef<Path>) -> Result<File> {
    open_file(path, OpenFlags::new().read(true), Options::new())
}

/// Open a file read-write, creating it if missing and truncating it if not.
pub fn create(path: impl AsRef<Path>, opts: Options) -> Result<File> {
    let flags = OpenFlags::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true);
    open_file(path, flags, opts)
}

/// Read the whole file into a byte buffer.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::io("read", path, e))
}

/// Write the whole buffer, creating the file (and missing parents) if needed
/// and truncating any existing content. The data is fsynced before returning;
/// a write error takes precedence over a sync error.
pub fn write(path: impl AsRef<Path>, data: impl AsRef<[u8]>, opts: Options) -> Result<()> {
    let path = path.as_ref();
    let flags = OpenFlags::new().write(true).create(true).truncate(true);
    let mut f = open_file(path, flags, opts)?;
    let mut err = f.write_all(data.as_ref()).err();
    if let Err(e) = f.sync_all() {
        err.get_or_insert(e);
    }
    match err {
        Some(e) => Err(Error::io("write", path, e)),
        None => Ok(()),
    }
}

/// Iterate over the lines of a file, newline-stripped.
///
/// If the file cannot be opened the iterator is simply empty — this is the
/// lenient tier, with no error channel. Iteration stops at the first read
/// error, and dropping the iterator closes the file.
pub fn read_lines(path: impl AsRef<Path>) -> ReadLines {
    ReadLines {
        lines: File::open(path.as_ref())
            .ok()
            .map(|f| BufReader::new(f).lines()),
    }
}

/// Lazy line iterator returned by [`read_lines`].
#[derive(Debug)]
pub struct ReadLines {
    lines: Option<io::Lines<BufReader<File>>>,
}

impl Iterator for ReadLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.lines.as_mut()?.next() {
            Some(Ok(line)) => Some(line),
            // Error or end of file: release the handle now.
            Some(Err(_)) | None => {
                self.lines = None;
                None
            }
        }
    }
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
