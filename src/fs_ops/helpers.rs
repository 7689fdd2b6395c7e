//! I/O helper utilities.
//!
//! Wraps `io::Error` into [`LinksymError::Filesystem`] with the operation,
//! the offending path and a platform-aware hint.
//!
//! Usage:
//!   fs::rename(src, dst).map_err(io_error_with_help("rename directory", src))?;

use std::io;
use std::path::Path;

use crate::errors::LinksymError;

/// Format a human-friendly message with op/path plus errno hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => {
                Some("permission denied; check ownership or run with elevated privileges")
            }
            libc::EXDEV => Some("cross-filesystem; directories can only be relocated within one filesystem"),
            libc::EBUSY => Some("resource busy; ensure no other process is using it"),
            libc::ENOENT => Some("path not found; verify it exists"),
            libc::EEXIST => Some("already exists; remove the target or pick another destination"),
            libc::ENOTEMPTY => Some("directory not empty"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE => Some("process file descriptor limit reached"),
            _ => None,
        };
        if let Some(hint) = hint {
            msg.push_str("; ");
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        let hint = match e.kind() {
            io::ErrorKind::PermissionDenied => Some("permission denied"),
            io::ErrorKind::NotFound => Some("path not found; verify it exists"),
            io::ErrorKind::AlreadyExists => Some("already exists"),
            _ => None,
        };
        if let Some(hint) = hint {
            msg.push_str("; ");
            msg.push_str(hint);
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that turns an `io::Error`
/// into [`LinksymError::Filesystem`] for `path`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> LinksymError + 'a {
    move |e: io::Error| LinksymError::Filesystem {
        path: path.to_path_buf(),
        message: build_message(op, path, &e),
        cause: e,
    }
}
