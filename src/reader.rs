//! Read-side file handle.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::errors::{Error, Result};

/// Open `path` read-only and wrap it in a [`FileReader`].
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<FileReader> {
    let path = path.as_ref();
    File::open(path)
        .map(|file| FileReader { file })
        .map_err(|e| Error::io("open", path, e))
}

/// Pass-through reader owning the underlying descriptor for its lifetime.
/// The descriptor is released on drop.
#[derive(Debug)]
pub struct FileReader {
    file: File,
}

impl FileReader {
    /// Read at the given byte offset without moving the file cursor.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_at(buf, offset)
        }
        #[cfg(windows)]
        {
            use std::os::windows::fs::FileExt;
            self.file.seek_read(buf, offset)
        }
    }

    /// Unwrap into the underlying `File`.
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sequential_and_positioned_reads() {
        let td = tempdir().unwrap();
        let path = td.path().join("r.bin");
        fs::write(&path, b"0123456789").unwrap();

        let mut r = open_file_reader(&path).unwrap();
        let mut head = [0u8; 4];
        r.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"0123");

        // Positioned read ignores the cursor.
        let mut mid = [0u8; 3];
        let n = r.read_at(&mut mid, 5).unwrap();
        assert_eq!(&mid[..n], b"567");

        // Sequential read resumes where it left off.
        let mut next = [0u8; 2];
        r.read_exact(&mut next).unwrap();
        assert_eq!(&next, b"45");
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let td = tempdir().unwrap();
        let err = open_file_reader(td.path().join("absent")).unwrap_err();
        assert!(err.is_not_found());
    }
}
