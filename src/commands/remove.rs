use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{LinksymError, Result};
use crate::fs_ops::{io_error_with_help, unlink};
use crate::manifest::Manifest;
use crate::path_info::normalize;
use crate::records::{LinkRecord, record_name};

/// Undo the link recorded for `path` and drop its record.
///
/// `path` is looked up by record name. Passing the link itself works too:
/// when its own name is unknown the name of its target is tried.
pub fn remove(manifest: &mut Manifest, path: &Path, dry_run: bool) -> Result<LinkRecord> {
    let absolute = normalize(path)?;
    let index = find_record(manifest, &absolute)?;
    let record = manifest
        .records
        .get(index)
        .cloned()
        .ok_or_else(|| LinksymError::RecordNotFound(record_name(&absolute)))?;

    let is_directory = match fs::symlink_metadata(&record.destination_path) {
        Ok(meta) => meta.is_dir(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LinksymError::NotFound(record.destination_path.clone()));
        }
        Err(e) => {
            return Err(io_error_with_help("inspect destination", &record.destination_path)(e));
        }
    };

    if dry_run {
        debug!(name = %record.name, "Dry run: record kept");
        return Ok(record);
    }

    unlink(&record.source_path, &record.destination_path, is_directory)?;
    manifest.records.remove_record(index);
    debug!(name = %record.name, "Removed record");
    Ok(record)
}

fn find_record(manifest: &Manifest, path: &Path) -> Result<usize> {
    let name = record_name(path);
    if let Some(index) = manifest.records.find_by_name(&name) {
        return Ok(index);
    }

    if let Some(target) = link_target(path)
        && let Some(index) = manifest.records.find_by_name(&record_name(&target))
    {
        return Ok(index);
    }

    Err(LinksymError::RecordNotFound(name))
}

fn link_target(path: &Path) -> Option<PathBuf> {
    let target = fs::read_link(path).ok()?;
    let parent = path.parent().unwrap_or(Path::new("/"));
    normalize(&parent.join(target)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use tempfile::tempdir;

    fn managed_file(td: &Path) -> (Manifest, PathBuf, PathBuf) {
        let managed = td.join("dotfiles");
        fs::create_dir(&managed).unwrap();
        let src = td.join(".vimrc");
        fs::write(&src, "set nu").unwrap();
        let mut m = Manifest::new(&managed);
        add(&mut m, &src, None, false).unwrap();
        (m, src, managed.join(".vimrc"))
    }

    #[test]
    fn remove_by_destination_restores_file() {
        let td = tempdir().unwrap();
        let (mut m, src, dst) = managed_file(td.path());

        let rec = remove(&mut m, &dst, false).unwrap();
        assert_eq!(rec.name, "dotfiles/.vimrc");
        assert!(m.records.is_empty());
        assert!(fs::symlink_metadata(&src).unwrap().is_file());
        assert_eq!(fs::read_to_string(&src).unwrap(), "set nu");
        assert!(!dst.exists());
    }

    #[test]
    fn remove_by_link_path_follows_target() {
        let td = tempdir().unwrap();
        let (mut m, src, _) = managed_file(td.path());

        remove(&mut m, &src, false).unwrap();
        assert!(m.records.is_empty());
        assert!(fs::symlink_metadata(&src).unwrap().is_file());
    }

    #[test]
    fn dry_run_keeps_link_and_record() {
        let td = tempdir().unwrap();
        let (mut m, src, dst) = managed_file(td.path());

        remove(&mut m, &dst, true).unwrap();
        assert_eq!(m.records.len(), 1);
        assert!(fs::symlink_metadata(&src).unwrap().file_type().is_symlink());
    }

    #[test]
    fn unknown_name_is_record_not_found() {
        let td = tempdir().unwrap();
        let mut m = Manifest::new(td.path());
        let err = remove(&mut m, &td.path().join("ghost"), false).unwrap_err();
        assert!(matches!(err, LinksymError::RecordNotFound(_)));
    }
}
