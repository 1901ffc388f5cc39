//! Signal handling.
//!
//! `SIGINT`/`SIGQUIT` are latched by an async-signal-safe handler and
//! drained cooperatively by the reaper loop, which forwards them to every
//! running child before clearing the latch.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static SAW_SIGINT: AtomicBool = AtomicBool::new(false);
static SAW_SIGQUIT: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_signal(sig: libc::c_int) {
    match sig {
        libc::SIGINT => SAW_SIGINT.store(true, Ordering::SeqCst),
        libc::SIGQUIT => SAW_SIGQUIT.store(true, Ordering::SeqCst),
        _ => {}
    }
}

/// Installs the handler for `SIGINT` and `SIGQUIT`. Idempotent.
pub fn install() -> io::Result<()> {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = handle_signal as usize;
        libc::sigemptyset(&mut sa.sa_mask);
        sa.sa_flags = 0;

        if libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::sigaction(libc::SIGQUIT, &sa, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Returns whether `SIGINT` was seen since the last call, clearing the latch.
pub fn take_sigint() -> bool {
    SAW_SIGINT.swap(false, Ordering::SeqCst)
}

/// Returns whether `SIGQUIT` was seen since the last call, clearing the latch.
pub fn take_sigquit() -> bool {
    SAW_SIGQUIT.swap(false, Ordering::SeqCst)
}
