use std::fs;
use std::path::PathBuf;

use linksym::config::{SETTINGS_ENV, load_settings, load_settings_from_path};
use linksym::{LogLevel, Settings};
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn reads_full_settings_file() {
    let td = tempdir().unwrap();
    let path = td.path().join("config.xml");
    fs::write(
        &path,
        r#"<config>
  <log_level>info</log_level>
  <log_file>/var/tmp/linksym.log</log_file>
</config>"#,
    )
    .unwrap();

    let s = load_settings_from_path(&path).unwrap();
    assert_eq!(
        s,
        Settings {
            log_level: LogLevel::Info,
            log_file: Some(PathBuf::from("/var/tmp/linksym.log")),
        }
    );
}

#[test]
fn malformed_file_names_the_path() {
    let td = tempdir().unwrap();
    let path = td.path().join("config.xml");
    fs::write(&path, "<config><log_level>info</config>").unwrap();

    let err = load_settings_from_path(&path).unwrap_err();
    assert!(
        format!("{err:#}").contains("config.xml"),
        "error should mention the file: {err:#}"
    );
}

#[test]
#[serial]
fn missing_default_file_means_defaults() {
    let td = tempdir().unwrap();
    let old_home = std::env::var_os("HOME");
    let old_xdg = std::env::var_os("XDG_CONFIG_HOME");
    // SAFETY: serialized with the other environment-mutating tests.
    unsafe {
        std::env::remove_var(SETTINGS_ENV);
        std::env::set_var("HOME", td.path());
        std::env::set_var("XDG_CONFIG_HOME", td.path().join(".config"));
    }

    let res = load_settings();

    unsafe {
        match old_home {
            Some(h) => std::env::set_var("HOME", h),
            None => std::env::remove_var("HOME"),
        }
        match old_xdg {
            Some(x) => std::env::set_var("XDG_CONFIG_HOME", x),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
    assert_eq!(res.unwrap(), None);
}
