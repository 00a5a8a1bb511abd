//! The process-wide default modes are global state; these tests mutate them
//! and therefore run serialized, restoring the defaults on the way out.

use filekit::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, Options, set_default_dir_mode, set_default_file_mode};
use serial_test::serial;
use tempfile::tempdir;

mod common;

#[cfg(unix)]
#[test]
#[serial(default_modes)]
fn default_file_mode_flows_into_write() {
    use std::os::unix::fs::PermissionsExt;
    common::init_tracing();
    set_default_file_mode(0o600);

    let td = tempdir().unwrap();
    let path = td.path().join("private.txt");
    filekit::write(&path, "data", Options::new()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);

    set_default_file_mode(DEFAULT_FILE_MODE);
}

#[cfg(unix)]
#[test]
#[serial(default_modes)]
fn default_dir_mode_flows_into_mkdir() {
    use std::os::unix::fs::PermissionsExt;
    set_default_dir_mode(0o700);

    let td = tempdir().unwrap();
    let d = td.path().join("private-dir");
    filekit::mkdir(&d, Options::new()).unwrap();

    let mode = std::fs::metadata(&d).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o700);

    set_default_dir_mode(DEFAULT_DIR_MODE);
}

#[test]
#[serial(default_modes)]
fn explicit_options_ignore_later_default_changes() {
    let opts = Options::new().with_file_mode(0o640);
    set_default_file_mode(0o666);
    assert_eq!(opts.file_mode, 0o640);
    set_default_file_mode(DEFAULT_FILE_MODE);
}
