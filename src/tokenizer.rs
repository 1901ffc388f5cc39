//! A quoting-aware word scanner, generalized from the configuration file
//! tokenizer's character-state machine (`Skip` / `SkipComment` / `Word` /
//! `Double` / `Single`).
//!
//! Unlike the original, EOF while inside a quoted state is a reported
//! error rather than a silent finish (see the design notes' open
//! question about unterminated strings).

use crate::buffer::TokenBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    UnterminatedString,
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unterminated quoted string")
    }
}

impl std::error::Error for TokenizeError {}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Skip,
    SkipComment,
    Word,
    Double,
    Single,
}

/// Scans one whitespace/quote-delimited word from the start of `s`,
/// skipping leading whitespace and a trailing `#`-comment first.
///
/// Returns the unquoted word and the byte offset in `s` immediately past
/// it, or `None` if `s` has no more words.
pub fn scan_word(s: &str) -> Result<Option<(String, usize)>, TokenizeError> {
    let mut state = State::Skip;
    let mut word = TokenBuffer::new();
    let mut started = false;

    for (idx, c) in s.char_indices() {
        match state {
            State::Skip => {
                if c == '#' {
                    state = State::SkipComment;
                } else if c.is_whitespace() {
                    continue;
                } else if c == '"' {
                    state = State::Double;
                    started = true;
                } else if c == '\'' {
                    state = State::Single;
                    started = true;
                } else {
                    word.push(c);
                    state = State::Word;
                    started = true;
                }
            }
            State::SkipComment => {
                if c == '\n' {
                    state = State::Skip;
                }
            }
            State::Word => {
                if c.is_whitespace() {
                    return Ok(Some((word.finalize(), idx)));
                } else if c == '"' {
                    state = State::Double;
                } else if c == '\'' {
                    state = State::Single;
                } else if c == '#' {
                    return Ok(Some((word.finalize(), idx)));
                } else {
                    word.push(c);
                }
            }
            State::Double => {
                if c == '"' {
                    state = State::Word;
                } else {
                    word.push(c);
                }
            }
            State::Single => {
                if c == '\'' {
                    state = State::Word;
                } else {
                    word.push(c);
                }
            }
        }
    }

    match state {
        State::Double | State::Single => Err(TokenizeError::UnterminatedString),
        _ if started => Ok(Some((word.finalize(), s.len()))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bare_word() {
        assert_eq!(
            scan_word("hello world").unwrap(),
            Some(("hello".to_string(), 5))
        );
    }

    #[test]
    fn skips_leading_whitespace() {
        assert_eq!(
            scan_word("   hello").unwrap(),
            Some(("hello".to_string(), 8))
        );
    }

    #[test]
    fn comment_only_line_yields_no_word() {
        assert_eq!(scan_word("   # nothing here").unwrap(), None);
    }

    #[test]
    fn double_quoted_word_with_embedded_space() {
        assert_eq!(
            scan_word("\"a b\" rest").unwrap(),
            Some(("a b".to_string(), 5))
        );
    }

    #[test]
    fn single_quoted_word() {
        assert_eq!(scan_word("'a b'").unwrap(), Some(("a b".to_string(), 5)));
    }

    #[test]
    fn adjacent_quoted_and_bare_segments_join_into_one_word() {
        assert_eq!(
            scan_word("foo\"bar baz\"qux").unwrap(),
            Some(("foobar bazqux".to_string(), 15))
        );
    }

    #[test]
    fn unterminated_double_quote_is_an_error() {
        assert_eq!(
            scan_word("\"never closes"),
            Err(TokenizeError::UnterminatedString)
        );
    }

    #[test]
    fn unterminated_single_quote_is_an_error() {
        assert_eq!(
            scan_word("'never closes"),
            Err(TokenizeError::UnterminatedString)
        );
    }
}
