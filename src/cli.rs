//! Command line parsing.
//!
//! A small state machine over the raw argument tokens, since the option
//! syntax (`-np 4`, a bare `--` ending the option section, a non-dash
//! token also ending it) does not map onto a conventional flag parser.

#[derive(Debug, Default, Clone)]
pub struct CliOptions {
    pub np: Option<usize>,
    pub machinefile: Option<String>,
    pub stdin_template: Option<String>,
    pub stdout_template: Option<String>,
    pub stderr_template: Option<String>,
    pub program_argv: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum CliError {
    /// `-help`, `-h` or `-?`: print usage and exit 0.
    Help,
    /// Any other malformed input: print the message, then usage, exit 1.
    Usage(String),
}

#[derive(Clone, Copy)]
enum State {
    Opt,
    Np,
    Machine,
    Stdin,
    Stdout,
    Stderr,
    Param,
    Done,
}

/// Parses the arguments following `argv[0]`.
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<CliOptions, CliError> {
    let mut opts = CliOptions::default();
    let mut state = State::Opt;

    for arg in args {
        state = match state {
            State::Opt => match arg.as_str() {
                "-np" => State::Np,
                "-machinefile" => State::Machine,
                "-stdin" => State::Stdin,
                "-stdout" => State::Stdout,
                "-stderr" => State::Stderr,
                "-help" | "-h" | "-?" => return Err(CliError::Help),
                "--" => State::Param,
                _ if arg.starts_with('-') => {
                    return Err(CliError::Usage(format!("Unknown option \"{}\"", arg)))
                }
                _ => {
                    opts.program_argv.push(arg);
                    State::Done
                }
            },
            State::Np => {
                let n: i64 = arg
                    .parse()
                    .map_err(|_| CliError::Usage("\"-np\" requires a positive integer.".into()))?;
                if n <= 0 {
                    return Err(CliError::Usage(
                        "\"-np\" requires a positive integer.".into(),
                    ));
                }
                opts.np = Some(n as usize);
                State::Opt
            }
            State::Machine => {
                opts.machinefile = Some(arg);
                State::Opt
            }
            State::Stdin => {
                opts.stdin_template = Some(arg);
                State::Opt
            }
            State::Stdout => {
                opts.stdout_template = Some(arg);
                State::Opt
            }
            State::Stderr => {
                opts.stderr_template = Some(arg);
                State::Opt
            }
            State::Param | State::Done => {
                opts.program_argv.push(arg);
                State::Done
            }
        };
    }

    match state {
        State::Opt | State::Param => {
            Err(CliError::Usage("Missing program to run.".into()))
        }
        State::Np => Err(CliError::Usage("\"-np\" requires processor count.".into())),
        State::Machine => Err(CliError::Usage(
            "\"-machinefile\" requires the machine file.".into(),
        )),
        State::Stdin => Err(CliError::Usage(
            "\"-stdin\" requires a file template.".into(),
        )),
        State::Stdout => Err(CliError::Usage(
            "\"-stdout\" requires a file template.".into(),
        )),
        State::Stderr => Err(CliError::Usage(
            "\"-stderr\" requires a file template.".into(),
        )),
        State::Done => Ok(opts),
    }
}

pub fn usage(progname: &str) -> String {
    format!(
        "Usage: {} [-np NP] [-machinefile MF] -- PROG ARGS...\n\n\
         \u{20}-np NP           Run job NP times.\n\
         \u{20}-machinefile MF  Use machines in MF.\n\
         \u{20}-stderr ERRTEMP  Path template for error file.\n\
         \u{20}-stdin INTEMP    Path template for input file.\n\
         \u{20}-stdout OUTTEMP  Path template for output file.\n",
        progname
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn minimal_invocation() {
        let opts = parse(args(&["--", "/bin/true"])).unwrap();
        assert_eq!(opts.program_argv, vec!["/bin/true"]);
        assert_eq!(opts.np, None);
    }

    #[test]
    fn a_bare_non_dash_token_also_ends_the_option_section() {
        let opts = parse(args(&["/bin/true", "-x"])).unwrap();
        assert_eq!(opts.program_argv, vec!["/bin/true", "-x"]);
    }

    #[test]
    fn parses_np_and_templates() {
        let opts = parse(args(&[
            "-np", "4", "-stdout", "out-%p.log", "--", "prog", "a", "b",
        ]))
        .unwrap();
        assert_eq!(opts.np, Some(4));
        assert_eq!(opts.stdout_template.as_deref(), Some("out-%p.log"));
        assert_eq!(opts.program_argv, vec!["prog", "a", "b"]);
    }

    #[test]
    fn np_zero_is_rejected() {
        let err = parse(args(&["-np", "0", "--", "prog"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn np_negative_is_rejected() {
        let err = parse(args(&["-np", "-3", "--", "prog"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = parse(args(&["-bogus", "--", "prog"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn missing_program_is_rejected() {
        let err = parse(args(&["-np", "2"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn help_short_circuits() {
        assert!(matches!(parse(args(&["-help"])), Err(CliError::Help)));
        assert!(matches!(parse(args(&["-h"])), Err(CliError::Help)));
        assert!(matches!(parse(args(&["-?"])), Err(CliError::Help)));
    }

    #[test]
    fn dangling_option_requiring_an_argument_is_rejected() {
        assert!(matches!(parse(args(&["-np"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse(args(&["-machinefile"])),
            Err(CliError::Usage(_))
        ));
    }
}
