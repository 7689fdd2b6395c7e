//! Default path helpers and symlink checks.

use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::SETTINGS_ENV;

/// Settings file location: `$LINKSYM_SETTINGS`, else the platform config
/// directory (`~/.config/linksym/config.xml` on Linux).
pub fn default_settings_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(SETTINGS_ENV) {
        return Some(PathBuf::from(explicit));
    }
    config_dir().map(|base| base.join("linksym").join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|base| base.join("linksym").join("linksym.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if let Ok(meta) = fs::symlink_metadata(anc)
            && meta.file_type().is_symlink()
        {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
