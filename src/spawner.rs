//! Forks, redirects and execs one job instance onto a host.

use std::ffi::CString;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::io::IntoRawFd;

use crate::argv::ArgvBuilder;
use crate::config::ConfigData;
use crate::job::JobData;
use crate::pool::{HostId, MachinePool};
use crate::template;

/// Forks a child bound to `host`, records its pid on the host, and returns
/// to the parent. The child never returns: it redirects its standard
/// streams, resets job-control signal dispositions, starts a new session
/// and execs the rewritten spawn command, exiting with status 1 if any of
/// that fails.
pub fn spawn(
    progname: &str,
    pool: &mut MachinePool,
    host: HostId,
    cfg: &ConfigData,
    proc_index: usize,
    job: &JobData,
) -> io::Result<()> {
    let host_name = pool.host(host).name.clone();

    let mut builder = ArgvBuilder::new();
    builder
        .add_string(&cfg.spawn_command)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "embedded NUL in spawn command"))?;
    builder
        .add_string(&host_name)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "embedded NUL in host name"))?;
    for arg in &job.program_argv {
        let rewritten = template::rewrite(arg, &cfg.job_name, proc_index);
        builder
            .add_string(&rewritten)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "embedded NUL in program argument"))?;
    }
    let argv = builder.finalize();

    let in_path = job
        .stdin_template
        .as_ref()
        .map(|t| template::rewrite(t, &cfg.job_name, proc_index));
    let out_path = job
        .stdout_template
        .as_ref()
        .map(|t| template::rewrite(t, &cfg.job_name, proc_index));
    let err_path = job
        .stderr_template
        .as_ref()
        .map(|t| template::rewrite(t, &cfg.job_name, proc_index));

    let progname_c =
        CString::new(progname).unwrap_or_else(|_| CString::new("runover").unwrap());

    let pid = crate::sys::cvt(unsafe { libc::fork() })?;
    if pid > 0 {
        pool.host_mut(host).run_pid = Some(pid as u32);
        return Ok(());
    }

    // Child: never returns normally.
    child_main(&progname_c, in_path.as_deref(), out_path.as_deref(), err_path.as_deref(), &argv);
}

/// The child side of [`spawn`]. Diagnostics go to stderr in the exact
/// format the original program prints, since a failure here is reported by
/// a process whose parent has already moved on.
fn child_main(
    progname: &CString,
    in_path: Option<&str>,
    out_path: Option<&str>,
    err_path: Option<&str>,
    argv: &crate::argv::Argv,
) -> ! {
    if let Some(path) = in_path {
        redirect_or_die(progname, path, 0, open_read(path));
    }
    if let Some(path) = out_path {
        redirect_or_die(progname, path, 1, open_append(path));
    }
    if let Some(path) = err_path {
        redirect_or_die(progname, path, 2, open_append(path));
    }

    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
        libc::signal(libc::SIGQUIT, libc::SIG_DFL);
        libc::setsid();

        libc::execvp(argv.first().unwrap().as_ptr(), argv.as_ptr());
    }

    let err = io::Error::last_os_error();
    eprintln!(
        "{}: Error executing \"{}\": {}",
        progname.to_string_lossy(),
        argv.first().unwrap().to_string_lossy(),
        err
    );
    std::process::exit(1);
}

fn open_read(path: &str) -> io::Result<std::fs::File> {
    OpenOptions::new().read(true).open(path)
}

fn open_append(path: &str) -> io::Result<std::fs::File> {
    OpenOptions::new()
        .write(true)
        .append(true)
        .create(true)
        .open(path)
}

/// Opens `path` and `dup2`s it onto `target_fd`, or prints the original
/// program's diagnostic and exits 1 if opening fails.
fn redirect_or_die(progname: &CString, path: &str, target_fd: i32, opened: io::Result<std::fs::File>) {
    let file = match opened {
        Ok(f) => f,
        Err(err) => {
            eprintln!(
                "{}: Error opening \"{}\": {}",
                progname.to_string_lossy(),
                path,
                err
            );
            std::process::exit(1);
        }
    };

    // Taking the raw fd hands off ownership: `file` no longer closes
    // anything on drop, so a `fd == target_fd` open (possible if the
    // corresponding standard stream was already closed) is left alone
    // instead of being closed out from under the redirection.
    let fd = file.into_raw_fd();
    if fd != target_fd {
        if crate::sys::cvt(unsafe { libc::dup2(fd, target_fd) }).is_err() {
            eprintln!(
                "{}: Error opening \"{}\": {}",
                progname.to_string_lossy(),
                path,
                io::Error::last_os_error()
            );
            std::process::exit(1);
        }
        unsafe {
            libc::close(fd);
        }
    }
}
