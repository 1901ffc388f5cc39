//! Placeholder expansion for per-instance path templates and user argv.
//!
//! Two escapes plus the literal-percent escape: `%j` (job name), `%p`
//! (process index) and `%%`.

/// Expands `%j`, `%p` and `%%` in `template`.
///
/// An unrecognized `%x` escape emits `x` verbatim and resumes scanning;
/// this is the documented resolution of the ambiguity left open by the
/// original state machine (see the design notes). A trailing `%` at the
/// end of input is silently dropped.
pub fn rewrite(template: &str, job_name: &str, proc_index: usize) -> String {
    enum State {
        Char,
        Pct,
    }

    let mut out = String::with_capacity(template.len());
    let mut state = State::Char;

    for c in template.chars() {
        match state {
            State::Char => {
                if c == '%' {
                    state = State::Pct;
                } else {
                    out.push(c);
                }
            }
            State::Pct => {
                match c {
                    '%' => out.push('%'),
                    'j' => out.push_str(job_name),
                    'p' => out.push_str(&proc_index.to_string()),
                    other => out.push(other),
                }
                state = State::Char;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(rewrite("out.log", "run1", 3), "out.log");
    }

    #[test]
    fn expands_job_name_and_index() {
        assert_eq!(rewrite("out-%j-%p.log", "run1", 0), "out-run1-0.log");
        assert_eq!(rewrite("out-%j-%p.log", "run1", 1), "out-run1-1.log");
    }

    #[test]
    fn literal_percent() {
        assert_eq!(rewrite("100%%-done", "run1", 0), "100%-done");
    }

    #[test]
    fn trailing_percent_is_dropped() {
        assert_eq!(rewrite("abc%", "run1", 0), "abc");
    }

    #[test]
    fn unknown_escape_emits_the_byte_verbatim() {
        assert_eq!(rewrite("%q", "run1", 0), "q");
    }

    #[test]
    fn concatenation_law_holds_away_from_escape_boundaries() {
        let job = "run1";
        let proc = 7;
        let cases: &[(&str, &str)] = &[
            ("foo-", "bar-%p"),
            ("%j/", "log-%p.txt"),
            ("no-escapes-", "-here-either"),
        ];
        for (s1, s2) in cases {
            let mut concatenated = String::new();
            concatenated.push_str(s1);
            concatenated.push_str(s2);
            assert_eq!(
                rewrite(&concatenated, job, proc),
                format!("{}{}", rewrite(s1, job, proc), rewrite(s2, job, proc))
            );
        }
    }
}
