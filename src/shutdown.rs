//! Process-wide interrupt flag.
//! Set by the Ctrl-C handler; the engines consult it before each mutating
//! step so an interrupt never lands between relocation and linking.
//!
//! Relaxed atomics are sufficient for a one-way "stop" flag, and `request()`
//! is safe to call from a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{LinksymError, Result};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// `Err(Interrupted)` once a shutdown was requested.
pub fn check() -> Result<()> {
    if is_requested() {
        Err(LinksymError::Interrupted)
    } else {
        Ok(())
    }
}

/// Clear the flag; only tests need this.
#[doc(hidden)]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
