//! A builder for the argv vector passed to `execvp`.
//!
//! The original `AV_Control` hand-rolls a single `malloc`'d block holding
//! the pointer table immediately followed by the concatenated, NUL
//! terminated strings it points into, so that one `free` releases
//! everything. This re-expresses that release discipline as ownership: a
//! finalized [`Argv`] owns both the strings and the pointer table built
//! from them, and dropping it releases both together. `CString` already
//! guarantees the "no interior NUL" and "always NUL terminated" invariants
//! the original enforced by hand.

use std::ffi::{CString, NulError};
use std::os::raw::c_char;
use std::ptr;

/// Accumulates strings before finalizing them into an [`Argv`].
#[derive(Debug, Default)]
pub struct ArgvBuilder {
    strings: Vec<CString>,
}

impl ArgvBuilder {
    pub fn new() -> Self {
        ArgvBuilder {
            strings: Vec::new(),
        }
    }

    /// Adds one argument. Rejects a string with an interior NUL, the only
    /// string `execvp` could never express; this is also the role the
    /// original's "AddString rejects a null string" rule plays in C, where
    /// a null *pointer* argument is reserved for the internal terminator.
    pub fn add_string<S: AsRef<str>>(&mut self, s: S) -> Result<(), NulError> {
        self.strings.push(CString::new(s.as_ref())?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Finalizes the accumulated strings into an [`Argv`], resetting this
    /// builder so it can be reused.
    pub fn finalize(&mut self) -> Argv {
        Argv::from_strings(std::mem::take(&mut self.strings))
    }
}

/// A finalized, `execvp`-ready argument vector: a pointer table of length
/// `argc + 1` whose last entry is null, each of the first `argc` entries
/// pointing at one of the owned strings kept alongside it.
#[derive(Debug)]
pub struct Argv {
    storage: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl Argv {
    fn from_strings(strings: Vec<CString>) -> Self {
        let mut pointers: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        pointers.push(ptr::null());
        Argv {
            storage: strings,
            pointers,
        }
    }

    /// Number of real arguments, not counting the null terminator.
    pub fn argc(&self) -> usize {
        self.pointers.len() - 1
    }

    /// Pointer table suitable for passing as `execvp`'s second argument.
    pub fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }

    pub fn first(&self) -> Option<&std::ffi::CStr> {
        self.storage.first().map(|c| c.as_c_str())
    }

    pub fn strings(&self) -> &[CString] {
        &self.storage
    }
}
