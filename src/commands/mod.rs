//! Command orchestration.
//!
//! Each command takes the manifest explicitly and leaves persisting it to
//! the caller, which saves once at normal exit.

mod add;
mod init;
mod remove;
mod source;
mod update;

pub use add::add;
pub use init::init;
pub use remove::remove;
pub use source::{SourceReport, source};
pub use update::update;
