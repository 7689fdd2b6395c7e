//! Path classifier.
//!
//! Decides which transition an `add` performs. Two arguments are reduced to
//! a pair of [`PathState`]s and looked up in [`transition`], one exhaustive
//! match over all sixteen pairs. Classification never touches the
//! filesystem beyond `stat`; directories the transition needs are named in
//! [`Transition::create_directory`] and created by the executor.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::errors::{LinksymError, Result};
use crate::fs_ops::io_error_with_help;
use crate::path_info::{PathInfo, PathState};

/// A concrete relocate/link step with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Path that ends up as the symlink.
    pub source: PathBuf,
    /// Path that ends up holding the content.
    pub destination: PathBuf,
    pub is_directory: bool,
    /// Directory to create before relocating, when the user asked for one.
    pub create_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Relocate the source content to the destination, then link.
    MoveThenLink(Transition),
    /// Content already sits at the destination; only link.
    LinkOnly(Transition),
    Reject(Rejection),
}

/// Why a source/destination pair cannot be linked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Destination {} already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error("Can't link a directory: {} to a file: {}", from.display(), to.display())]
    DirectoryToFile { from: PathBuf, to: PathBuf },

    #[error("Can't link a file: {} to a directory: {}", from.display(), to.display())]
    FileToDirectory { from: PathBuf, to: PathBuf },

    #[error(
        "Source {} and destination {} don't exist, nothing to link",
        from.display(),
        to.display()
    )]
    NothingToLink { from: PathBuf, to: PathBuf },

    /// Moving a link would relocate the link rather than what it points
    /// to, and the link left behind would point at another link. Link the
    /// target itself instead.
    #[error("{} is already a symbolic link", .0.display())]
    SourceIsLink(PathBuf),

    #[error("Source and destination are the same path: {}", .0.display())]
    SamePath(PathBuf),

    /// A path can't be relocated into its own subtree.
    #[error(
        "Destination {} is inside the source directory {}",
        to.display(),
        from.display()
    )]
    DestinationInsideSource { from: PathBuf, to: PathBuf },

    #[error("Cannot derive a file name from {}", .0.display())]
    Unnamed(PathBuf),

    #[error("{} is occupied by something other than the expected link", .0.display())]
    Occupied(PathBuf),
}

/// Kind of rejection the table produces, before paths are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    DestinationExists,
    DirectoryToFile,
    FileToDirectory,
    NothingToLink,
}

/// Table cell for one `(source, destination)` state pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Relocate to `destination/basename(source)`; `create` makes the
    /// destination directory first.
    MoveInto { create: bool },
    /// Relocate to exactly `destination`.
    MoveTo,
    LinkOnly,
    Reject(RejectKind),
}

/// The transition table.
pub const fn transition(source: PathState, destination: PathState) -> Outcome {
    use Outcome::*;
    use PathState::*;
    use RejectKind::*;

    match (source, destination) {
        (File, Directory) => MoveInto { create: false },
        (File, File) => Reject(DestinationExists),
        (File, AbsentDirectory) => MoveInto { create: true },
        (File, AbsentFile) => MoveTo,

        (Directory, Directory) => MoveInto { create: false },
        (Directory, File) => Reject(DirectoryToFile),
        (Directory, AbsentDirectory) => MoveInto { create: true },
        (Directory, AbsentFile) => Reject(DirectoryToFile),

        // source not created yet: its separator says what it will be
        (AbsentFile, File) => LinkOnly,
        (AbsentDirectory, File) => Reject(DirectoryToFile),
        (AbsentDirectory, Directory) => LinkOnly,
        (AbsentFile, Directory) => Reject(FileToDirectory),

        (AbsentFile | AbsentDirectory, AbsentFile | AbsentDirectory) => Reject(NothingToLink),
    }
}

/// Classify an `add` invocation.
///
/// With one argument the destination is `init_directory/basename(source)`
/// and the source must exist. With two the table decides.
pub fn classify(
    source: &Path,
    destination: Option<&Path>,
    init_directory: &Path,
) -> Result<Decision> {
    let source = PathInfo::inspect(source)?;

    let decision = match destination {
        None => classify_single(&source, init_directory)?,
        Some(destination) => classify_pair(&source, &PathInfo::inspect(destination)?),
    };
    debug!(?decision, "Classified paths");
    Ok(decision)
}

fn classify_single(source: &PathInfo, init_directory: &Path) -> Result<Decision> {
    if source.is_symlink {
        return Ok(Decision::Reject(Rejection::SourceIsLink(
            source.absolute_path.clone(),
        )));
    }
    if !source.exists {
        return Err(LinksymError::NotFound(source.absolute_path.clone()));
    }
    let Some(name) = source.absolute_path.file_name() else {
        return Ok(Decision::Reject(Rejection::Unnamed(
            source.absolute_path.clone(),
        )));
    };

    let destination = init_directory.join(name);
    if destination == source.absolute_path {
        return Ok(Decision::Reject(Rejection::SamePath(destination)));
    }
    if destination.starts_with(&source.absolute_path) {
        return Ok(Decision::Reject(Rejection::DestinationInsideSource {
            from: source.absolute_path.clone(),
            to: destination,
        }));
    }
    match fs::symlink_metadata(&destination) {
        Ok(_) => return Ok(Decision::Reject(Rejection::DestinationExists(destination))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error_with_help("stat", &destination)(e)),
    }

    Ok(Decision::MoveThenLink(Transition {
        source: source.absolute_path.clone(),
        destination,
        is_directory: source.is_directory,
        create_directory: None,
    }))
}

/// Apply the table to two inspected paths.
pub fn classify_pair(source: &PathInfo, destination: &PathInfo) -> Decision {
    let from = &source.absolute_path;
    let to = &destination.absolute_path;

    if source.is_symlink {
        return Decision::Reject(Rejection::SourceIsLink(from.clone()));
    }
    if from == to {
        return Decision::Reject(Rejection::SamePath(from.clone()));
    }
    // checked before the table so no directory gets created inside the source
    if to.starts_with(from) {
        return Decision::Reject(Rejection::DestinationInsideSource {
            from: from.clone(),
            to: to.clone(),
        });
    }

    let reject = |kind: RejectKind| {
        Decision::Reject(match kind {
            RejectKind::DestinationExists => Rejection::DestinationExists(to.clone()),
            RejectKind::DirectoryToFile => Rejection::DirectoryToFile {
                from: from.clone(),
                to: to.clone(),
            },
            RejectKind::FileToDirectory => Rejection::FileToDirectory {
                from: from.clone(),
                to: to.clone(),
            },
            RejectKind::NothingToLink => Rejection::NothingToLink {
                from: from.clone(),
                to: to.clone(),
            },
        })
    };

    match transition(source.state(), destination.state()) {
        Outcome::MoveInto { create } => {
            let Some(name) = from.file_name() else {
                return Decision::Reject(Rejection::Unnamed(from.clone()));
            };
            Decision::MoveThenLink(Transition {
                source: from.clone(),
                destination: to.join(name),
                is_directory: source.is_directory,
                create_directory: create.then(|| to.clone()),
            })
        }
        Outcome::MoveTo => Decision::MoveThenLink(Transition {
            source: from.clone(),
            destination: to.clone(),
            is_directory: source.is_directory,
            create_directory: None,
        }),
        Outcome::LinkOnly => Decision::LinkOnly(Transition {
            source: from.clone(),
            destination: to.clone(),
            is_directory: destination.is_directory,
            create_directory: None,
        }),
        Outcome::Reject(kind) => reject(kind),
    }
}

impl Decision {
    /// The transition to execute, if any.
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Decision::MoveThenLink(t) | Decision::LinkOnly(t) => Some(t),
            Decision::Reject(_) => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::MoveThenLink(t) => {
                if let Some(dir) = &t.create_directory {
                    write!(f, "create '{}', ", dir.display())?;
                }
                write!(
                    f,
                    "move '{}' -> '{}' and link it back",
                    t.source.display(),
                    t.destination.display()
                )
            }
            Decision::LinkOnly(t) => write!(
                f,
                "link '{}' -> '{}'",
                t.source.display(),
                t.destination.display()
            ),
            Decision::Reject(reason) => write!(f, "reject: {reason}"),
        }
    }
}
