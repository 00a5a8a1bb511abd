//! Filesystem conveniences built around atomic publishing.
//!
//! A thin layer over `std::fs`: directory creation and listing, reads and
//! writes with auto-created parent directories, temp resources, and the two
//! operations worth having a library for — an atomic write-via-temp-then-
//! rename [`FileWriter`] and a recursive [`copy`] that publishes a whole tree
//! with a single rename. Keep the library small and ergonomic: a plain
//! [`Options`] value for permission modes, and free functions that map one-
//! to-one onto filesystem operations.
//!
//! Queries come in two tiers: strict `try_*` functions that surface errors,
//! and lenient bare-name forms that collapse any error into a safe default
//! (`false` or an empty listing). The split follows `Path::try_exists` versus
//! `Path::exists` and is part of the contract, not optional error handling.
//!
//! Atomicity is per final path: the destination of a [`FileWriter`] or a
//! directory [`copy`] is either untouched or completely replaced, never
//! partial. Two callers publishing to the same path race with OS-level
//! last-writer-wins semantics; this crate does no locking between them.

mod dir;
mod errors;
mod file;
mod options;
mod query;
mod reader;
mod temp;
mod transfer;
mod writer;

pub use dir::{mkdir, mkdir_all, remove, remove_all};
pub use errors::{Error, Result};
pub use file::{OpenFlags, ReadLines, create, open, open_file, read, read_lines, write};
pub use options::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, Options, default_dir_mode, default_file_mode,
    set_default_dir_mode, set_default_file_mode,
};
pub use query::{
    exists, is_dir, is_empty_dir, read_dir_entries, read_dir_metadata, read_dir_names, try_exists,
    try_is_dir, try_is_empty_dir, try_read_dir_entries, try_read_dir_metadata, try_read_dir_names,
};
pub use reader::{FileReader, open_file_reader};
pub use temp::{create_temp_dir, create_temp_file};
pub use transfer::{copy, move_path, rename, walk};
pub use writer::{FileWriter, open_file_writer};

// The temp-resource guards in this crate's API are tempfile's; re-export them
// so callers don't need a direct dependency to name the types.
pub use tempfile::{NamedTempFile, TempDir};
