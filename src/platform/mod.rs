//! Platform-specific helpers.
//! linksym only targets Unix (it is built on symbolic links), so the
//! helpers live in a single `unix` module behind this facade.

mod temp;
mod unix;

pub use unix::{atomic_write, open_log_file_secure_append};
