//! Runs a job: spawns `np` instances over the machine pool, recycling
//! hosts as they free up, and waits for every instance to finish.

use crate::config::ConfigData;
use crate::error::RunoverError;
use crate::job::JobData;
use crate::pool::{HostId, MachinePool};
use crate::{reaper, signals, spawner};

pub fn run(
    progname: &str,
    pool: &mut MachinePool,
    cfg: &ConfigData,
    np: usize,
    job: &JobData,
) -> Result<(), RunoverError> {
    if np > 0 && pool.is_empty() {
        return Err(RunoverError::EmptyPool);
    }

    signals::install()?;

    for proc_index in 0..np {
        let host = acquire_ready(pool, progname)?;
        spawner::spawn(progname, pool, host, cfg, proc_index, job)?;
        pool.add_running(host);
    }

    while !pool.running_is_empty() {
        reaper::step(pool, progname)?;
    }

    Ok(())
}

/// Takes a host from `ready`, waiting on in-flight instances as needed
/// until one frees up.
fn acquire_ready(pool: &mut MachinePool, progname: &str) -> Result<HostId, RunoverError> {
    loop {
        if let Some(host) = pool.take_ready() {
            return Ok(host);
        }
        reaper::step(pool, progname)?;
    }
}
