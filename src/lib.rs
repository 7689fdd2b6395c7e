//! Core library for `linksym`.
//!
//! Moves files and directories into a managed directory, leaves a symbolic
//! link at the original location, and keeps a manifest of every link so it
//! can be undone or re-created elsewhere.
//!
//! - `path_info` + `classify`: reduce two paths to a [`Decision`]
//! - `fs_ops`: relocate content and create/reverse links
//! - `records` + `manifest`: the persisted record store
//! - `commands`: `init`, `add`, `remove`, `source`, `update`
//!
//! Everything returns [`LinksymError`]; only the binary prints and exits.

#[cfg(not(unix))]
compile_error!("linksym relies on POSIX symlink and rename semantics and only builds on Unix");

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod manifest;
pub mod output;
pub mod path_info;
pub mod platform;
pub mod records;
pub mod shutdown;

pub use classify::{Decision, Rejection, Transition, classify};
pub use config::{
    LogLevel, Settings, default_log_path, default_settings_path, load_settings,
    path_has_symlink_ancestor,
};
pub use errors::{LinksymError, Result};
pub use fs_ops::{link, move_and_link, relocate, unlink};
pub use manifest::{MANIFEST_NAME, Manifest};
pub use path_info::{PathInfo, PathState};
pub use records::{LinkRecord, RecordStore, record_name};
