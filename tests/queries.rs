use std::ffi::OsString;
use std::fs;

use filekit::{
    Options, is_dir, is_empty_dir, read_dir_names, try_is_dir, try_is_empty_dir,
    try_read_dir_metadata, try_read_dir_names,
};
use tempfile::tempdir;

mod common;

#[test]
fn fresh_directory_is_empty_until_a_file_lands() {
    common::init_tracing();
    let td = tempdir().unwrap();
    let d = td.path().join("fresh");
    filekit::mkdir(&d, Options::new()).unwrap();

    assert!(try_is_empty_dir(&d).unwrap());
    assert!(is_empty_dir(&d));

    fs::write(d.join("occupant"), b"x").unwrap();
    assert!(!try_is_empty_dir(&d).unwrap());
    assert!(!is_empty_dir(&d));
}

#[test]
fn listings_snapshot_the_directory() {
    let td = tempdir().unwrap();
    for name in ["a", "b", "c"] {
        fs::write(td.path().join(name), name).unwrap();
    }

    let mut names = try_read_dir_names(td.path()).unwrap();
    names.sort();
    assert_eq!(
        names,
        vec![OsString::from("a"), OsString::from("b"), OsString::from("c")]
    );

    let mut with_meta = try_read_dir_metadata(td.path()).unwrap();
    with_meta.sort_by(|(a, _), (b, _)| a.cmp(b));
    assert_eq!(with_meta.len(), 3);
    for (name, meta) in &with_meta {
        assert!(meta.is_file());
        assert_eq!(meta.len(), name.len() as u64);
    }
}

#[test]
fn is_dir_follows_the_node_type() {
    let td = tempdir().unwrap();
    let f = td.path().join("plain.txt");
    fs::write(&f, b"x").unwrap();

    assert!(try_is_dir(td.path()).unwrap());
    assert!(!try_is_dir(&f).unwrap());
    assert!(is_dir(td.path()));
    assert!(!is_dir(&f));
}

#[test]
fn strict_and_lenient_tiers_are_distinct_contracts() {
    let td = tempdir().unwrap();
    let missing = td.path().join("missing");

    // Strict tier: errors surface.
    assert!(try_is_dir(&missing).unwrap_err().is_not_found());
    assert!(try_is_empty_dir(&missing).unwrap_err().is_not_found());
    assert!(try_read_dir_names(&missing).unwrap_err().is_not_found());

    // Lenient tier: same conditions collapse to safe defaults.
    assert!(!is_dir(&missing));
    assert!(!is_empty_dir(&missing));
    assert!(read_dir_names(&missing).is_empty());
}
