//! Thin helpers over raw libc calls used by the spawner and reaper.

use std::io;
use std::os::raw::c_int;

/// Converts a libc return value into a `Result`, treating `-1` as failure.
pub fn cvt(t: c_int) -> io::Result<c_int> {
    if t == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(t)
    }
}

/// Retries `f` while it fails with `EINTR`.
pub fn cvt_retry_on_interrupt(f: impl Fn() -> c_int) -> io::Result<c_int> {
    loop {
        match cvt(f()) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            res => break res,
        }
    }
}
