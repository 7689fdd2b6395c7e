//! CLI definition and parsing.
//!
//! Notes:
//! - Paths are kept exactly as typed; a trailing `/` tells the classifier a
//!   missing path is meant to be a directory.
//! - `--debug` is a shorthand for `--log-level debug`.

use clap::{Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::{LogLevel, Settings};
use crate::manifest::MANIFEST_NAME;

/// Environment variable naming the manifest file.
pub const MANIFEST_ENV: &str = "LINKSYM_CONFIG";

/// Move files into a managed directory and leave symlinks behind.
/// CLI flags override the settings file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Manage dotfiles with symlinks")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Manifest to use instead of `./.linksym.yaml`.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        help = "Path to the manifest (default: ./.linksym.yaml, or $LINKSYM_CONFIG)"
    )]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an empty manifest managing the current directory.
    Init,

    /// Move SOURCE into the managed directory (or DESTINATION) and link it back.
    Add {
        #[arg(value_hint = ValueHint::AnyPath)]
        source: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        destination: Option<PathBuf>,
        #[arg(long, help = "Show what would be done, but do not modify anything")]
        dry_run: bool,
    },

    /// Remove a link and move its content back.
    Remove {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        #[arg(long, help = "Show what would be done, but do not modify anything")]
        dry_run: bool,
    },

    /// Re-create every recorded link.
    Source,

    /// Make the current directory the managed directory.
    Update,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use settings).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to loaded settings (in-place).
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(level) = self.effective_log_level() {
            settings.log_level = level;
        }
    }

    /// Manifest location: `--config` > `$LINKSYM_CONFIG` > `cwd/.linksym.yaml`.
    pub fn manifest_path(&self, cwd: &Path) -> PathBuf {
        let chosen = self
            .config
            .clone()
            .or_else(|| std::env::var_os(MANIFEST_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(MANIFEST_NAME));
        cwd.join(chosen)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
