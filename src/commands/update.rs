use std::path::Path;
use tracing::info;

use crate::manifest::Manifest;

/// Point the manifest at `directory`, keeping every record.
/// Returns the previous managed directory.
pub fn update(manifest: &mut Manifest, directory: &Path) -> std::path::PathBuf {
    let previous = std::mem::replace(&mut manifest.init_directory, directory.to_path_buf());
    info!(
        from = %previous.display(),
        to = %directory.display(),
        "Updated managed directory"
    );
    previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn update_keeps_records() {
        let mut m = Manifest::new("/old");
        m.records.add_record("/home/u/.vimrc", "/old/.vimrc");

        let previous = update(&mut m, Path::new("/new"));
        assert_eq!(previous, PathBuf::from("/old"));
        assert_eq!(m.init_directory, PathBuf::from("/new"));
        assert_eq!(m.records.len(), 1);
    }
}
