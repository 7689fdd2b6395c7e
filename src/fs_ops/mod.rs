//! Filesystem operations: transfer and link engines.

mod helpers;
mod io_copy;
mod link;
mod relocate;
mod util;

pub use helpers::io_error_with_help;
pub use link::{link, link_only, move_and_link, unlink};
pub use relocate::{move_dir, move_file, relocate};
pub use util::is_cross_device;
