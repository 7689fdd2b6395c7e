//! User settings (logging preferences), read from an optional XML file.
//! The manifest of links is a separate file; see [`crate::manifest`].

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_log_path, default_settings_path, path_has_symlink_ancestor};
pub use types::{LogLevel, Settings};
pub use xml::{load_settings, load_settings_from_path, parse_settings};

/// Environment variable naming an explicit settings file.
pub const SETTINGS_ENV: &str = "LINKSYM_SETTINGS";
