//! Command line entry point.

use std::process::{Command, ExitCode, Stdio};

use runover::cli::{self, CliError};
use runover::config;
use runover::error::RunoverError;
use runover::job::JobData;
use runover::pool::MachinePool;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args();
    let argv0 = args.next().unwrap_or_else(|| "runover".to_string());
    let progname = argv0
        .rsplit('/')
        .next()
        .unwrap_or(&argv0)
        .to_string();

    match run(&progname, args.collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Help) => {
            print!("{}", cli::usage(&progname));
            ExitCode::SUCCESS
        }
        Err(Failure::Usage(message)) => {
            eprintln!("{}: {}", progname, message);
            eprint!("{}", cli::usage(&progname));
            ExitCode::FAILURE
        }
        Err(Failure::Runover(err)) => {
            eprintln!("{}: {}", progname, err);
            ExitCode::FAILURE
        }
    }
}

enum Failure {
    Help,
    Usage(String),
    Runover(RunoverError),
}

impl From<RunoverError> for Failure {
    fn from(err: RunoverError) -> Self {
        Failure::Runover(err)
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::Runover(RunoverError::Io(err))
    }
}

fn run(progname: &str, args: Vec<String>) -> Result<(), Failure> {
    let opts = cli::parse(args).map_err(|e| match e {
        CliError::Help => Failure::Help,
        CliError::Usage(message) => Failure::Usage(message),
    })?;

    let config_script = config::default_config_script();
    let cfg = {
        let output = run_script(&config_script).map_err(|_| {
            Failure::Runover(RunoverError::Open {
                context: "configuration script",
                path: config_script.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "failed to execute",
                ),
            })
        })?;
        config::parse(output.as_slice())?
    };

    let mut pool = match opts.machinefile {
        Some(ref path) => {
            let file = std::fs::File::open(path).map_err(|source| RunoverError::Open {
                context: "machine file",
                path: path.clone(),
                source,
            })?;
            MachinePool::parse(file)?
        }
        None => {
            let output = run_script(&cfg.machine_script).map_err(|_| {
                Failure::Runover(RunoverError::Open {
                    context: "machine script",
                    path: cfg.machine_script.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "failed to execute",
                    ),
                })
            })?;
            MachinePool::parse(output.as_slice())?
        }
    };

    let np = opts.np.unwrap_or_else(|| pool.len());

    let job = JobData {
        stdin_template: opts.stdin_template,
        stdout_template: opts.stdout_template,
        stderr_template: opts.stderr_template,
        program_argv: opts.program_argv,
    };

    runover::driver::run(progname, &mut pool, &cfg, np, &job)?;

    Ok(())
}

/// Runs `path` as a subprocess with no arguments and captures its stdout,
/// the way the original shells out to the configuration and machine
/// scripts via `popen`.
fn run_script(path: &str) -> std::io::Result<Vec<u8>> {
    let output = Command::new(path)
        .stdin(Stdio::null())
        .output()?;
    let mut stdout = output.stdout;
    if !output.status.success() {
        log::warn!("{} exited with {}", path, output.status);
    }
    stdout.shrink_to_fit();
    Ok(stdout)
}
