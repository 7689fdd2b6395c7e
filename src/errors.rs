//! Typed error definitions for linksym.
//! Every failure maps onto one of five kinds so the binary can log a stable
//! `kind` and exit with a predictable code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::classify::Rejection;

#[derive(Debug, Error)]
pub enum LinksymError {
    /// The source/destination pair is not a valid transition.
    #[error(transparent)]
    Validation(#[from] Rejection),

    #[error("File {} doesn't exist", .0.display())]
    NotFound(PathBuf),

    #[error("No record named '{0}' in the manifest")]
    RecordNotFound(String),

    #[error("No manifest found at {}; run `linksym init` first", .0.display())]
    ManifestMissing(PathBuf),

    #[error("A manifest already exists at {}", .0.display())]
    ManifestExists(PathBuf),

    /// I/O failure; `message` already carries the operation, path and hint.
    #[error("{message}")]
    Filesystem {
        path: PathBuf,
        message: String,
        #[source]
        cause: io::Error,
    },

    #[error("Invalid manifest {}: {cause}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        cause: serde_yaml::Error,
    },

    /// A full copy reached the destination but the original could not be removed.
    #[error(
        "'{}' holds a complete copy but '{}' could not be removed: {cause}; remove one of them before retrying",
        copy.display(),
        original.display()
    )]
    Duplicate {
        original: PathBuf,
        copy: PathBuf,
        #[source]
        cause: io::Error,
    },

    /// Content was relocated but the link back to it was never created.
    #[error(
        "content now lives at '{}' but the link at '{}' could not be created: {cause}; move it back by hand",
        content.display(),
        link.display()
    )]
    Stranded {
        content: PathBuf,
        link: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("'{}' is not a symbolic link; refusing to restore over it", .0.display())]
    NotALink(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl LinksymError {
    /// Coarse classification used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LinksymError::Validation(_) => "validation",
            LinksymError::NotFound(_)
            | LinksymError::RecordNotFound(_)
            | LinksymError::ManifestMissing(_) => "not_found",
            LinksymError::Filesystem { .. }
            | LinksymError::Manifest { .. }
            | LinksymError::ManifestExists(_) => "filesystem",
            LinksymError::Duplicate { .. }
            | LinksymError::Stranded { .. }
            | LinksymError::NotALink(_) => "consistency",
            LinksymError::Interrupted => "interrupted",
        }
    }

    /// Process exit code for this error.
    pub fn code(&self) -> u8 {
        match self.kind() {
            "validation" => 2,
            "not_found" => 3,
            "filesystem" => 4,
            "consistency" => 5,
            _ => 130,
        }
    }
}

/// Library result alias.
pub type Result<T, E = LinksymError> = std::result::Result<T, E>;
