//! The manifest: `.linksym.yaml`.
//!
//! Holds the managed directory and the record store. It is loaded once,
//! passed by `&mut` to whichever command runs, and written back atomically
//! by the application at normal exit.
//!
//! # Layout
//!
//! ```yaml
//! init_directory: ~/dotfiles
//! records:
//!   - name: dotfiles/.bashrc
//!     paths:
//!       - ~/.bashrc
//!       - $init_directory/.bashrc
//! ```
//!
//! Paths under the managed directory are written as `$init_directory/...`
//! and paths under the home directory as `~/...`, so a manifest stays valid
//! when the whole tree moves to another machine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{LinksymError, Result};
use crate::fs_ops::io_error_with_help;
use crate::platform::atomic_write;
use crate::records::{LinkRecord, RecordStore};

/// File name of the manifest inside the managed directory.
pub const MANIFEST_NAME: &str = ".linksym.yaml";

const INIT_ALIAS: &str = "$init_directory";
const HOME_ALIAS: &str = "~";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Managed directory; single-argument `add` relocates into it.
    pub init_directory: PathBuf,
    pub records: RecordStore,
}

/// On-disk shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    init_directory: String,
    #[serde(default)]
    records: Vec<RecordEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordEntry {
    name: String,
    /// `[source, destination]`
    paths: [String; 2],
}

impl Manifest {
    pub fn new(init_directory: impl Into<PathBuf>) -> Self {
        Self {
            init_directory: init_directory.into(),
            records: RecordStore::new(),
        }
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LinksymError::ManifestMissing(path.to_path_buf()));
            }
            Err(e) => return Err(io_error_with_help("read manifest", path)(e)),
        };
        let manifest = Self::parse(&data, dirs::home_dir().as_deref()).map_err(|cause| {
            LinksymError::Manifest {
                path: path.to_path_buf(),
                cause,
            }
        })?;
        debug!(
            path = %path.display(),
            records = manifest.records.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Atomically write the manifest to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = self
            .render(dirs::home_dir().as_deref())
            .map_err(|cause| LinksymError::Manifest {
                path: path.to_path_buf(),
                cause,
            })?;
        atomic_write(path, data.as_bytes(), 0o644)
            .map_err(io_error_with_help("write manifest", path))?;
        info!(path = %path.display(), records = self.records.len(), "Saved manifest");
        Ok(())
    }

    /// Parse YAML, expanding aliases against `home`.
    pub fn parse(data: &str, home: Option<&Path>) -> Result<Self, serde_yaml::Error> {
        let file: ManifestFile = serde_yaml::from_str(data)?;
        let init_directory = expand(&file.init_directory, None, home);

        let mut records = RecordStore::new();
        for entry in file.records {
            let [source, destination] = entry.paths;
            records.push_loaded(LinkRecord {
                name: entry.name,
                source_path: expand(&source, Some(&init_directory), home),
                destination_path: expand(&destination, Some(&init_directory), home),
            });
        }

        Ok(Self {
            init_directory,
            records,
        })
    }

    /// Render YAML, abbreviating paths against `init_directory` and `home`.
    pub fn render(&self, home: Option<&Path>) -> Result<String, serde_yaml::Error> {
        let init = Some(self.init_directory.as_path());
        let file = ManifestFile {
            init_directory: abbreviate(&self.init_directory, None, home),
            records: self
                .records
                .iter()
                .map(|r| RecordEntry {
                    name: r.name.clone(),
                    paths: [
                        abbreviate(&r.source_path, init, home),
                        abbreviate(&r.destination_path, init, home),
                    ],
                })
                .collect(),
        };
        serde_yaml::to_string(&file)
    }
}

/// Replace the longest matching prefix with its alias.
fn abbreviate(path: &Path, init_directory: Option<&Path>, home: Option<&Path>) -> String {
    let candidates = [(init_directory, INIT_ALIAS), (home, HOME_ALIAS)];
    for (base, alias) in candidates {
        let Some(base) = base else { continue };
        if let Ok(rest) = path.strip_prefix(base) {
            return if rest.as_os_str().is_empty() {
                alias.to_string()
            } else {
                format!("{alias}/{}", rest.display())
            };
        }
    }
    path.display().to_string()
}

fn expand(raw: &str, init_directory: Option<&Path>, home: Option<&Path>) -> PathBuf {
    let candidates = [(init_directory, INIT_ALIAS), (home, HOME_ALIAS)];
    for (base, alias) in candidates {
        let Some(base) = base else { continue };
        if raw == alias {
            return base.to_path_buf();
        }
        if let Some(rest) = raw.strip_prefix(alias).and_then(|r| r.strip_prefix('/')) {
            return base.join(rest);
        }
    }
    PathBuf::from(raw)
}
