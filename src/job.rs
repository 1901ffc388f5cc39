//! The per-run job description assembled from CLI options.

/// Input, output and error path templates (any may be absent) plus the
/// user program and its arguments, each rewritten per instance before the
/// child is spawned.
#[derive(Debug, Default, Clone)]
pub struct JobData {
    pub stdin_template: Option<String>,
    pub stdout_template: Option<String>,
    pub stderr_template: Option<String>,
    pub program_argv: Vec<String>,
}
