//! The interrupt flag stops work before the filesystem is touched.

use std::fs;

use linksym::commands::{add, source};
use linksym::{LinksymError, Manifest, shutdown};
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn add_after_interrupt_changes_nothing() {
    let td = tempdir().unwrap();
    let managed = td.path().join("managed");
    fs::create_dir(&managed).unwrap();
    let src = td.path().join("rc");
    fs::write(&src, "x").unwrap();

    let mut m = Manifest::new(&managed);
    shutdown::request();
    let res = add(&mut m, &src, None, false);
    shutdown::reset();

    let err = res.unwrap_err();
    assert!(matches!(err, LinksymError::Interrupted));
    assert_eq!(err.code(), 130);
    assert!(fs::symlink_metadata(&src).unwrap().is_file());
    assert!(!managed.join("rc").exists());
    assert!(m.records.is_empty());
}

#[test]
#[serial]
fn source_stops_between_records() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("content"), "c").unwrap();
    let mut m = Manifest::new(td.path());
    m.records
        .add_record(td.path().join("link"), td.path().join("content"));

    shutdown::request();
    let res = source(&m);
    shutdown::reset();

    assert!(matches!(res, Err(LinksymError::Interrupted)));
    assert!(fs::symlink_metadata(td.path().join("link")).is_err());
}
