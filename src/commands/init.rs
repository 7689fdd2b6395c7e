use std::path::Path;
use tracing::info;

use crate::errors::{LinksymError, Result};
use crate::manifest::Manifest;

/// Create an empty manifest at `manifest_path` managing `directory`.
/// An existing manifest is never overwritten.
pub fn init(directory: &Path, manifest_path: &Path) -> Result<Manifest> {
    if std::fs::symlink_metadata(manifest_path).is_ok() {
        return Err(LinksymError::ManifestExists(manifest_path.to_path_buf()));
    }

    let manifest = Manifest::new(directory);
    manifest.save(manifest_path)?;
    info!(directory = %directory.display(), "Initialised managed directory");
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_NAME;
    use tempfile::tempdir;

    #[test]
    fn init_writes_empty_manifest_once() {
        let td = tempdir().unwrap();
        let path = td.path().join(MANIFEST_NAME);

        let m = init(td.path(), &path).unwrap();
        assert!(m.records.is_empty());
        assert_eq!(Manifest::load(&path).unwrap().init_directory, td.path());

        let err = init(td.path(), &path).unwrap_err();
        assert!(matches!(err, LinksymError::ManifestExists(_)));
    }
}
