use std::fs::File;
use std::io;
use std::path::Path;

/// True when a rename failed because source and destination live on
/// different filesystems.
pub fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::EXDEV)
}

/// Persist directory entry changes (rename, unlink, symlink) to disk.
pub(crate) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}
