//! Reclaims hosts whose instance has exited, and forwards caught signals
//! to every still-running instance.

use std::io;

use crate::pool::MachinePool;
use crate::signals;

/// Blocks for one child to exit (or for a caught signal to interrupt the
/// wait), then either recycles the corresponding host back to `ready` or
/// forwards the signal to every running instance.
pub fn step(pool: &mut MachinePool, progname: &str) -> io::Result<()> {
    let mut status: libc::c_int = 0;
    match crate::sys::cvt(unsafe { libc::wait(&mut status) }) {
        Ok(pid) => {
            if let Some(host) = pool.find_running_by_pid(pid as u32) {
                log::info!("{} finished on {}", progname, pool.host(host).name);
                pool.move_running_to_ready(host);
            } else {
                log::warn!("{}: reaped unknown pid {}", progname, pid);
            }
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::Interrupted => {
            forward_signals(pool, progname);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn forward_signals(pool: &MachinePool, progname: &str) {
    if signals::take_sigint() {
        log::info!("{}: caught SIGINT, forwarding to running instances", progname);
        send_to_running(pool, libc::SIGINT);
    }
    if signals::take_sigquit() {
        log::info!("{}: caught SIGQUIT, forwarding to running instances", progname);
        send_to_running(pool, libc::SIGQUIT);
    }
}

fn send_to_running(pool: &MachinePool, sig: libc::c_int) {
    for host in pool.running_ids() {
        if let Some(pid) = pool.host(host).run_pid {
            unsafe {
                libc::kill(pid as libc::pid_t, sig);
            }
        }
    }
}
