//! Streaming copy with durability.
//!
//! - Writes to a newly created destination file (`create_new`; never clobbers).
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//! - Flushes and `sync_all`s the destination before returning, so a caller
//!   that removes the source afterwards never loses the only durable copy.
//!
//! Both handles live inside `copy_streaming`, so they are closed on every
//! exit path including early returns on read/write errors. A failed copy
//! leaves the partially written destination in place for the caller to judge.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Failure of a streaming copy, split by which side failed so callers can
/// attach the right path to the error.
#[derive(Debug)]
pub(crate) enum CopyError {
    /// Opening the source for reading failed.
    Open(io::Error),
    /// Creating the destination failed; nothing was written.
    Create(io::Error),
    /// Reading, writing, flushing or syncing failed; destination is partial.
    Transfer(io::Error),
}

/// Copy `src` -> `dst`, then fsync the destination. Returns bytes written.
pub(crate) fn copy_streaming(src: &Path, dst: &Path) -> Result<u64, CopyError> {
    let src_f = File::open(src).map_err(CopyError::Open)?;
    let dst_f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(CopyError::Create)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer).map_err(CopyError::Transfer)?;
    writer.flush().map_err(CopyError::Transfer)?;
    writer.get_ref().sync_all().map_err(CopyError::Transfer)?;

    Ok(bytes)
}
