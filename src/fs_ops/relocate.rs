//! Transfer engine.
//! Directories are renamed in place (same filesystem only, never copied).
//! Files are stream-copied, synced, and then the original is removed.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{LinksymError, Result};

use super::helpers::io_error_with_help;
use super::io_copy::{CopyError, copy_streaming};
use super::util::{fsync_dir, is_cross_device};

/// Relocate `source` to `destination`.
pub fn relocate(source: &Path, destination: &Path, is_directory: bool) -> Result<()> {
    if is_directory {
        move_dir(source, destination)
    } else {
        move_file(source, destination)
    }
}

/// Rename a directory. Fails with the underlying error on cross-device moves.
pub fn move_dir(source: &Path, destination: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, destination) {
        if is_cross_device(&e) {
            warn!(
                src = %source.display(),
                dest = %destination.display(),
                "Directory rename crosses filesystems; not copying"
            );
        }
        return Err(io_error_with_help("rename directory", source)(e));
    }

    // Best-effort: a failed fsync must not turn a completed rename into an error.
    if let Some(parent) = destination.parent() {
        let _ = fsync_dir(parent);
    }
    info!(src = %source.display(), dest = %destination.display(), "Renamed directory");
    Ok(())
}

/// Copy a file to `destination`, sync it, then remove `source`.
///
/// If the copy fails, whatever reached `destination` stays there. If the
/// removal of `source` fails after a full copy, both paths hold the content
/// and [`LinksymError::Duplicate`] is returned.
pub fn move_file(source: &Path, destination: &Path) -> Result<()> {
    let bytes = copy_streaming(source, destination).map_err(|e| match e {
        CopyError::Open(e) => io_error_with_help("open source file", source)(e),
        CopyError::Create(e) => io_error_with_help("create destination file", destination)(e),
        CopyError::Transfer(e) => io_error_with_help("copy file contents to", destination)(e),
    })?;
    debug!(src = %source.display(), dest = %destination.display(), bytes, "Copied file");

    fs::remove_file(source).map_err(|cause| LinksymError::Duplicate {
        original: source.to_path_buf(),
        copy: destination.to_path_buf(),
        cause,
    })?;

    info!(src = %source.display(), dest = %destination.display(), "Moved file");
    Ok(())
}
