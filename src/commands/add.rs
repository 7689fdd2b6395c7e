use std::path::Path;
use tracing::{debug, info};

use crate::classify::{Decision, classify};
use crate::errors::{LinksymError, Result};
use crate::fs_ops::{link_only, move_and_link};
use crate::manifest::Manifest;

/// Classify `source`/`destination`, execute the transition and record it.
///
/// A rejected pair is returned as [`LinksymError::Validation`] before
/// anything on disk changes. With `dry_run` the decision is returned
/// without executing it.
pub fn add(
    manifest: &mut Manifest,
    source: &Path,
    destination: Option<&Path>,
    dry_run: bool,
) -> Result<Decision> {
    let decision = classify(source, destination, &manifest.init_directory)?;

    let transition = match &decision {
        Decision::Reject(reason) => return Err(LinksymError::Validation(reason.clone())),
        Decision::MoveThenLink(t) | Decision::LinkOnly(t) => t,
    };

    if dry_run {
        info!(%decision, "Dry run: nothing changed");
        return Ok(decision);
    }

    match &decision {
        Decision::MoveThenLink(_) => move_and_link(transition)?,
        _ => link_only(transition)?,
    }

    let record = manifest
        .records
        .add_record(&transition.source, &transition.destination);
    debug!(name = %record.name, "Recorded link");
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Rejection;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn single_argument_moves_into_managed_directory() {
        let td = tempdir().unwrap();
        let managed = td.path().join("dotfiles");
        fs::create_dir(&managed).unwrap();
        let src = td.path().join(".bashrc");
        fs::write(&src, "export A=1").unwrap();

        let mut m = Manifest::new(&managed);
        let decision = add(&mut m, &src, None, false).unwrap();

        assert!(matches!(decision, Decision::MoveThenLink(_)));
        assert_eq!(fs::read_link(&src).unwrap(), managed.join(".bashrc"));
        let rec = m.records.get(0).unwrap();
        assert_eq!(rec.name, "dotfiles/.bashrc");
        assert_eq!(rec.source_path, src);
    }

    #[test]
    fn dry_run_leaves_everything_alone() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, "a").unwrap();
        let dst = td.path().join("b.txt");

        let mut m = Manifest::new(td.path());
        let decision = add(&mut m, &src, Some(&dst), true).unwrap();

        assert!(matches!(decision, Decision::MoveThenLink(_)));
        assert!(fs::symlink_metadata(&src).unwrap().is_file());
        assert!(!dst.exists());
        assert!(m.records.is_empty());
    }

    #[test]
    fn rejection_is_a_validation_error_and_records_nothing() {
        let td = tempdir().unwrap();
        let dir = td.path().join("dir");
        fs::create_dir(&dir).unwrap();
        let file = td.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let mut m = Manifest::new(td.path());
        let err = add(&mut m, &dir, Some(&file), false).unwrap_err();

        assert!(matches!(
            err,
            LinksymError::Validation(Rejection::DirectoryToFile { .. })
        ));
        assert!(dir.is_dir());
        assert!(m.records.is_empty());
    }

    #[test]
    fn nested_destination_creates_nothing_inside_source() {
        let td = tempdir().unwrap();
        let conf = td.path().join("conf");
        fs::create_dir(&conf).unwrap();
        fs::write(conf.join("a"), "a").unwrap();
        let nested = std::path::PathBuf::from(format!("{}/sub/", conf.display()));

        let mut m = Manifest::new(td.path());
        let err = add(&mut m, &conf, Some(&nested), false).unwrap_err();

        assert!(matches!(
            err,
            LinksymError::Validation(Rejection::DestinationInsideSource { .. })
        ));
        assert!(!conf.join("sub").exists());
        assert!(fs::symlink_metadata(&conf).unwrap().is_dir());
        assert!(m.records.is_empty());
    }

    #[test]
    fn single_argument_missing_source_is_not_found() {
        let td = tempdir().unwrap();
        let mut m = Manifest::new(td.path().join("managed"));
        let err = add(&mut m, &td.path().join("nope"), None, false).unwrap_err();
        assert!(matches!(err, LinksymError::NotFound(_)));
    }
}
