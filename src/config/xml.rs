//! XML settings support.
//!
//! ```xml
//! <config>
//!   <log_level>info</log_level>
//!   <log_file>/path/to/linksym.log</log_file>
//! </config>
//! ```
//!
//! Unknown fields are an error so typos surface instead of being ignored.
//! Empty or unparsable values fall back to defaults.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_settings_path;
use super::types::{LogLevel, Settings};
use super::SETTINGS_ENV;

/// Struct mirroring the XML settings for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlSettings {
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Parse settings from XML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let parsed: XmlSettings = from_xml_str(contents).context("parse settings xml")?;

    let mut settings = Settings::default();
    if let Some(level) = parsed.log_level.as_deref().and_then(LogLevel::parse) {
        settings.log_level = level;
    }
    settings.log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    });
    Ok(settings)
}

/// Load settings from a specific XML file.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    parse_settings(&contents).with_context(|| format!("in settings file '{}'", path.display()))
}

/// Load settings from `$LINKSYM_SETTINGS` or the default location.
///
/// A missing default file means "use defaults" (`Ok(None)`); a missing file
/// named explicitly through the environment is an error.
pub fn load_settings() -> Result<Option<Settings>> {
    let explicit = std::env::var_os(SETTINGS_ENV).is_some();
    let Some(path) = default_settings_path() else {
        return Ok(None);
    };

    if !path.exists() {
        if explicit {
            bail!("{SETTINGS_ENV} points to '{}', which does not exist", path.display());
        }
        debug!(path = %path.display(), "No settings file; using defaults");
        return Ok(None);
    }

    load_settings_from_path(&path).map(Some)
}
