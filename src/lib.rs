//! `runover` spawns N instances of a command across a pool of remote
//! hosts, recycling hosts as instances finish.
//!
//! A machine pool ([`pool::MachinePool`]) tracks which hosts are free and
//! which are busy. The driver ([`driver::run`]) takes hosts from the
//! ready queue, launches one instance per host through the configured
//! spawn command (typically `ssh`), and reclaims hosts as their instance
//! exits, until every requested instance has run.
//!
//! Per-instance stdin/stdout/stderr redirection paths and the program's
//! own argument list go through a small `%j`/`%p` template language
//! ([`template::rewrite`]) so each instance can be pointed at its own
//! files.
//!
//! This crate is POSIX-only: it forks, execs, and installs signal
//! handlers directly via `libc`, and has no Windows implementation.

pub mod argv;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod pool;
pub mod queue;
pub mod template;
pub mod tokenizer;

#[cfg(unix)]
pub mod driver;
#[cfg(unix)]
pub mod reaper;
#[cfg(unix)]
pub mod signals;
#[cfg(unix)]
pub mod spawner;
#[cfg(unix)]
pub mod sys;
