//! Configuration script parsing.
//!
//! The configuration script (run as a subprocess; its stdout is the text
//! parsed here) is a line-oriented `<directive> <value>` format: `#`
//! starts a comment, blank lines are ignored, and the value may contain
//! embedded whitespace up to the end of the line.

use std::io::{self, Read};

use crate::error::RunoverError;
use crate::tokenizer;

/// Recognized configuration directives, each last-write-wins.
#[derive(Debug, Clone)]
pub struct ConfigData {
    pub machine_script: String,
    pub job_name: String,
    pub spawn_command: String,
}

impl Default for ConfigData {
    fn default() -> Self {
        ConfigData {
            machine_script: default_machine_script(),
            job_name: String::new(),
            spawn_command: "/usr/bin/ssh".to_string(),
        }
    }
}

pub fn default_config_script() -> String {
    std::env::var("RUNOVER_CONFIG_SCRIPT").unwrap_or_else(|_| "./config-script.sh".to_string())
}

pub fn default_machine_script() -> String {
    std::env::var("RUNOVER_MACHINE_SCRIPT").unwrap_or_else(|_| "./machine-script.sh".to_string())
}

/// Parses a configuration script's text into a [`ConfigData`], starting
/// from the built-in defaults.
pub fn parse<R: Read>(reader: R) -> Result<ConfigData, RunoverError> {
    let mut cfg = ConfigData::default();
    let mut buf = String::new();
    io::BufReader::new(reader)
        .read_to_string(&mut buf)
        .map_err(RunoverError::Io)?;

    for (idx, line) in buf.lines().enumerate() {
        let lineno = (idx + 1) as u64;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (directive, end) = tokenizer::scan_word(trimmed)
            .map_err(|e| RunoverError::Config {
                line: lineno,
                message: e.to_string(),
            })?
            .expect("a non-blank, non-comment line always yields at least one word");

        let value = trimmed[end..].trim_start();

        match directive.as_str() {
            "machinescript" => {
                cfg.machine_script = require_value(lineno, "machinescript", value)?.to_string();
            }
            "jobname" => {
                cfg.job_name = require_value(lineno, "jobname", value)?.to_string();
            }
            "spawncommand" | "spawncmd" | "spawn" => {
                cfg.spawn_command = require_value(lineno, &directive, value)?.to_string();
            }
            other => {
                return Err(RunoverError::Config {
                    line: lineno,
                    message: format!("Unknown directive \"{}\"", other),
                });
            }
        }
    }

    Ok(cfg)
}

fn require_value<'a>(line: u64, directive: &str, value: &'a str) -> Result<&'a str, RunoverError> {
    if value.is_empty() {
        Err(RunoverError::Config {
            line,
            message: format!("{} directive requires a value", directive),
        })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn defaults_when_script_is_empty() {
        let cfg = parse(Cursor::new("")).unwrap();
        assert_eq!(cfg.job_name, "");
        assert_eq!(cfg.spawn_command, "/usr/bin/ssh");
    }

    #[test]
    fn spawn_command_is_taken_verbatim_after_the_directive() {
        let cfg = parse(Cursor::new("spawn /usr/bin/ssh -x\n")).unwrap();
        assert_eq!(cfg.spawn_command, "/usr/bin/ssh -x");
    }

    #[test]
    fn aliases_all_set_spawn_command() {
        for directive in ["spawncommand", "spawncmd", "spawn"] {
            let cfg = parse(Cursor::new(format!("{} /bin/rsh\n", directive))).unwrap();
            assert_eq!(cfg.spawn_command, "/bin/rsh");
        }
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let cfg = parse(Cursor::new("# a comment\n\njobname demo\n")).unwrap();
        assert_eq!(cfg.job_name, "demo");
    }

    #[test]
    fn unknown_directive_is_a_config_error_naming_the_line() {
        let err = parse(Cursor::new("jobname ok\nbogus value\n")).unwrap_err();
        match err {
            RunoverError::Config { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("bogus"));
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_value_is_a_config_error() {
        let err = parse(Cursor::new("jobname\n")).unwrap_err();
        assert!(matches!(err, RunoverError::Config { line: 1, .. }));
    }

    #[test]
    fn last_write_wins() {
        let cfg = parse(Cursor::new("jobname first\njobname second\n")).unwrap();
        assert_eq!(cfg.job_name, "second");
    }
}
