use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::classify::Rejection;
use crate::errors::{LinksymError, Result};
use crate::fs_ops::{io_error_with_help, link};
use crate::manifest::Manifest;
use crate::records::LinkRecord;
use crate::shutdown;

/// Outcome of re-linking every record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub linked: usize,
    /// Already linked correctly.
    pub skipped: usize,
    /// Records that could not be linked, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Re-create the link for every record, e.g. after cloning the managed
/// directory onto a fresh machine. Failures are collected, not fatal.
pub fn source(manifest: &Manifest) -> Result<SourceReport> {
    let mut report = SourceReport::default();

    for record in manifest.records.iter() {
        shutdown::check()?;
        match source_one(record) {
            Ok(true) => report.linked += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => {
                warn!(name = %record.name, error = %e, "Could not link record");
                report.failed.push((record.name.clone(), e.to_string()));
            }
        }
    }
    Ok(report)
}

/// `Ok(true)` when a link was created, `Ok(false)` when it already existed.
fn source_one(record: &LinkRecord) -> Result<bool> {
    let source = &record.source_path;
    let destination = &record.destination_path;

    if let Ok(meta) = fs::symlink_metadata(source) {
        if meta.file_type().is_symlink()
            && fs::read_link(source).is_ok_and(|t| t == *destination)
        {
            debug!(name = %record.name, "Already linked");
            return Ok(false);
        }
        return Err(Rejection::Occupied(source.clone()).into());
    }

    if fs::symlink_metadata(destination).is_err() {
        return Err(LinksymError::NotFound(destination.clone()));
    }

    if let Some(parent) = source.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_parents(parent)?;
    }
    link(source, destination)?;
    Ok(true)
}

fn create_parents(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(io_error_with_help("create parent directory", dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn links_missing_skips_correct_reports_broken() {
        let td = tempdir().unwrap();
        let managed = td.path().join("dotfiles");
        fs::create_dir(&managed).unwrap();
        fs::write(managed.join("a"), "A").unwrap();
        fs::write(managed.join("b"), "B").unwrap();

        let home = td.path().join("home");
        let mut m = Manifest::new(&managed);
        // needs linking, parent created on the way
        m.records.add_record(home.join("nested/a"), managed.join("a"));
        // already linked
        fs::create_dir_all(&home).unwrap();
        std::os::unix::fs::symlink(managed.join("b"), home.join("b")).unwrap();
        m.records.add_record(home.join("b"), managed.join("b"));
        // content missing
        m.records.add_record(home.join("c"), managed.join("c"));

        let report = source(&m).unwrap();
        assert_eq!(report.linked, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "dotfiles/c");
        assert_eq!(fs::read_to_string(home.join("nested/a")).unwrap(), "A");
    }

    #[test]
    fn occupied_source_is_reported() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("content"), "x").unwrap();
        fs::write(td.path().join("occupied"), "y").unwrap();

        let mut m = Manifest::new(td.path());
        m.records
            .add_record(td.path().join("occupied"), td.path().join("content"));

        let report = source(&m).unwrap();
        assert_eq!(report.linked, 0);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(fs::read_to_string(td.path().join("occupied")).unwrap(), "y");
    }
}
