//! Link engine.
//! Creates the symlink at the vacated source path and reverses it.
//!
//! There is no rollback: when linking fails after content was relocated the
//! error says where the content went so the user can repair it by hand.

use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::Path;
use tracing::{debug, info};

use crate::classify::Transition;
use crate::errors::{LinksymError, Result};
use crate::shutdown;

use super::helpers::io_error_with_help;
use super::relocate::{move_dir, move_file, relocate};

/// Create a symbolic link at `source` pointing to `destination`.
/// Fails if anything already occupies `source`.
pub fn link(source: &Path, destination: &Path) -> Result<()> {
    symlink(destination, source).map_err(io_error_with_help("create symlink", source))?;
    info!(link = %source.display(), target = %destination.display(), "Created symlink");
    Ok(())
}

/// Remove the symlink at `source` and move the content at `destination`
/// back into its place.
pub fn unlink(source: &Path, destination: &Path, is_directory: bool) -> Result<()> {
    shutdown::check()?;

    let meta = fs::symlink_metadata(source).map_err(io_error_with_help("inspect link", source))?;
    if !meta.file_type().is_symlink() {
        return Err(LinksymError::NotALink(source.to_path_buf()));
    }

    fs::remove_file(source).map_err(io_error_with_help("remove symlink", source))?;
    debug!(link = %source.display(), "Removed symlink");

    if is_directory {
        move_dir(destination, source)
    } else {
        move_file(destination, source)
    }
}

/// Relocate the content of a transition, then link back to it.
pub fn move_and_link(transition: &Transition) -> Result<()> {
    move_and_link_with(transition, |target, link| symlink(target, link))
}

/// [`move_and_link`] with the final link step supplied by the caller.
pub(crate) fn move_and_link_with<F>(transition: &Transition, make_link: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    shutdown::check()?;

    if let Some(dir) = &transition.create_directory {
        fs::create_dir_all(dir).map_err(io_error_with_help("create destination directory", dir))?;
        debug!(path = %dir.display(), "Created destination directory");
    }

    relocate(
        &transition.source,
        &transition.destination,
        transition.is_directory,
    )?;

    make_link(&transition.destination, &transition.source).map_err(|cause| {
        LinksymError::Stranded {
            content: transition.destination.clone(),
            link: transition.source.clone(),
            cause,
        }
    })?;
    info!(
        link = %transition.source.display(),
        target = %transition.destination.display(),
        "Relocated and linked"
    );
    Ok(())
}

/// Link to content the user already placed at the destination.
pub fn link_only(transition: &Transition) -> Result<()> {
    shutdown::check()?;
    link(&transition.source, &transition.destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn transition(source: PathBuf, destination: PathBuf, is_directory: bool) -> Transition {
        Transition {
            source,
            destination,
            is_directory,
            create_directory: None,
        }
    }

    #[test]
    fn file_round_trip_restores_bytes() {
        let td = tempdir().unwrap();
        let src = td.path().join("notes.txt");
        let dst = td.path().join("managed.txt");
        fs::write(&src, b"\x00binary\xffcontent").unwrap();

        move_and_link(&transition(src.clone(), dst.clone(), false)).unwrap();
        assert!(fs::symlink_metadata(&src).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&src).unwrap(), dst);
        assert_eq!(fs::read(&src).unwrap(), b"\x00binary\xffcontent");

        unlink(&src, &dst, false).unwrap();
        assert!(!fs::symlink_metadata(&src).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&src).unwrap(), b"\x00binary\xffcontent");
        assert!(!dst.exists());
    }

    #[test]
    fn directory_round_trip_restores_tree() {
        let td = tempdir().unwrap();
        let src = td.path().join("conf");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/a"), "A").unwrap();
        let dst = td.path().join("store").join("conf");
        fs::create_dir_all(dst.parent().unwrap()).unwrap();

        move_and_link(&transition(src.clone(), dst.clone(), true)).unwrap();
        assert_eq!(fs::read_link(&src).unwrap(), dst);
        assert_eq!(fs::read_to_string(dst.join("nested/a")).unwrap(), "A");

        unlink(&src, &dst, true).unwrap();
        assert!(fs::symlink_metadata(&src).unwrap().is_dir());
        assert_eq!(fs::read_to_string(src.join("nested/a")).unwrap(), "A");
        assert!(!dst.exists());
    }

    #[test]
    fn move_and_link_creates_requested_directory() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, "a").unwrap();
        let dir = td.path().join("new").join("deep");
        let t = Transition {
            source: src.clone(),
            destination: dir.join("a.txt"),
            is_directory: false,
            create_directory: Some(dir.clone()),
        };

        move_and_link(&t).unwrap();
        assert_eq!(fs::read_to_string(dir.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_link(&src).unwrap(), dir.join("a.txt"));
    }

    #[test]
    fn failed_link_after_move_is_stranded() {
        let td = tempdir().unwrap();
        let src = td.path().join("settings.json");
        fs::write(&src, b"{\"a\": 1}").unwrap();
        let dst = td.path().join("store").join("settings.json");
        fs::create_dir_all(dst.parent().unwrap()).unwrap();

        let err = move_and_link_with(&transition(src.clone(), dst.clone(), false), |_, _| {
            Err(io::Error::from_raw_os_error(libc::EACCES))
        })
        .unwrap_err();

        match &err {
            LinksymError::Stranded { content, link, .. } => {
                assert_eq!(content, &dst);
                assert_eq!(link, &src);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(err.kind(), "consistency");
        assert_eq!(err.code(), 5);
        assert!(err.to_string().contains(&dst.display().to_string()), "{err}");
        // content moved, nothing left at the link path
        assert_eq!(fs::read(&dst).unwrap(), b"{\"a\": 1}");
        assert!(fs::symlink_metadata(&src).is_err());
    }

    #[test]
    fn failed_link_after_directory_move_is_stranded() {
        let td = tempdir().unwrap();
        let src = td.path().join("conf");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/a"), "A").unwrap();
        let dst = td.path().join("conf.moved");

        let err = move_and_link_with(&transition(src.clone(), dst.clone(), true), |_, _| {
            Err(io::Error::from_raw_os_error(libc::EROFS))
        })
        .unwrap_err();

        assert!(matches!(err, LinksymError::Stranded { .. }));
        assert_eq!(fs::read_to_string(dst.join("nested/a")).unwrap(), "A");
        assert!(fs::symlink_metadata(&src).is_err());
    }

    #[test]
    fn link_fails_when_source_occupied() {
        let td = tempdir().unwrap();
        let src = td.path().join("taken");
        let dst = td.path().join("real");
        fs::write(&src, "x").unwrap();
        fs::write(&dst, "y").unwrap();

        let err = link(&src, &dst).unwrap_err();
        assert!(err.to_string().contains("already exists"), "got: {err}");
        assert_eq!(fs::read_to_string(&src).unwrap(), "x");
    }

    #[test]
    fn unlink_refuses_regular_file() {
        let td = tempdir().unwrap();
        let src = td.path().join("plain");
        let dst = td.path().join("content");
        fs::write(&src, "plain").unwrap();
        fs::write(&dst, "content").unwrap();

        let err = unlink(&src, &dst, false).unwrap_err();
        assert!(matches!(err, LinksymError::NotALink(_)));
        assert_eq!(fs::read_to_string(&src).unwrap(), "plain");
        assert_eq!(fs::read_to_string(&dst).unwrap(), "content");
    }
}
