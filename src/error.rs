//! The crate's error taxonomy, matching the diagnostics the external
//! interface specifies byte-for-byte (see `main`'s error rendering).

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunoverError {
    #[error("{line}: {message}")]
    Config { line: u64, message: String },

    #[error("Unable to open {context} \"{path}\"")]
    Open {
        context: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// The machine pool is empty but at least one instance was requested.
    /// Detected before spawning to avoid blocking forever in the reaper.
    #[error("no usable hosts: machine list is empty")]
    EmptyPool,

    #[error(transparent)]
    Io(#[from] io::Error),
}
