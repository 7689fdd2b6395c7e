//! Path probing for the classifier.
//!
//! Arguments are made absolute and lexically cleaned before anything looks
//! at them. The trailing separator is read from the raw argument, because
//! cleaning drops it and it is the only hint that a path which does not
//! exist yet is meant to be a directory.

use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, Path, PathBuf};

use crate::errors::Result;
use crate::fs_ops::io_error_with_help;

/// Filesystem facts about one command-line path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    pub absolute_path: PathBuf,
    /// Whether the path resolves (symlinks followed) to an existing entry.
    pub exists: bool,
    pub is_directory: bool,
    /// Whether the path itself is a symbolic link, dangling or not.
    pub is_symlink: bool,
    pub has_trailing_separator: bool,
}

/// The four states the transition table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathState {
    Directory,
    File,
    /// Missing, written with a trailing `/`.
    AbsentDirectory,
    /// Missing, written without a trailing `/`.
    AbsentFile,
}

impl PathInfo {
    /// Stat `arg` (following symlinks) and record what was found.
    pub fn inspect(arg: impl AsRef<Path>) -> Result<Self> {
        let raw = arg.as_ref();
        let has_trailing_separator = raw.as_os_str().as_bytes().ends_with(b"/");
        let absolute_path = normalize(raw)?;

        let (exists, is_directory) = match fs::metadata(&absolute_path) {
            Ok(meta) => (true, meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => (false, false),
            Err(e) => return Err(io_error_with_help("stat", &absolute_path)(e)),
        };
        let is_symlink = fs::symlink_metadata(&absolute_path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        Ok(Self {
            absolute_path,
            exists,
            is_directory,
            is_symlink,
            has_trailing_separator,
        })
    }

    pub fn state(&self) -> PathState {
        match (self.exists, self.is_directory, self.has_trailing_separator) {
            (true, true, _) => PathState::Directory,
            (true, false, _) => PathState::File,
            (false, _, true) => PathState::AbsentDirectory,
            (false, _, false) => PathState::AbsentFile,
        }
    }
}

/// Absolute, lexically cleaned form of `path` (`.` dropped, `..` folded).
/// Symlinks are not resolved.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir()
            .map_err(io_error_with_help("resolve current directory for", path))?;
        cwd.join(path)
    };
    Ok(clean(&joined))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // popping "/" leaves "/", like `cd ..` at the root
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
