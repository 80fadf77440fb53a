//! Parse errors for LSD documents.

use std::fmt;
use std::io;

use crate::Span;

/// Everything that can go wrong while parsing an LSD document.
///
/// The set is closed; the parser aborts on the first error and never
/// recovers, accumulates, or returns a partial tree.
#[derive(Debug)]
pub enum ParseErrorKind {
    /// The underlying input stream raised an I/O error.
    ReadFailure(io::Error),

    /// Non-whitespace content followed a braced or bracketed root.
    UnexpectedCharAtFileEnd,

    /// Input ended inside a quoted string, or in the middle of an escape's
    /// hex digits.
    UnexpectedStringEnd,

    /// Unknown escape letter after `\`, or input ended right after `\`.
    UnexpectedCharEscapeEnd,

    /// Malformed `\x` escape: bad hex digit, invalid start byte, broken
    /// continuation chain, or bytes that do not decode as UTF-8.
    UnexpectedCharInByteEscape,

    /// Malformed `\u` escape: bad hex digit, lone surrogate without a
    /// partner, or an invalid surrogate pair.
    UnexpectedCharInUnicodeEscape,

    /// Inside a braced level, neither a key nor `}` was found.
    ExpectedKeyOrEnd,

    /// A `.` in a key path was not followed by a key part.
    ExpectedKeyPartAfterKeySeparator,

    /// A key path was not followed by a value, list or level.
    ExpectedLsdAfterKey,

    /// Inside a bracketed list, neither an item nor `]` was found.
    ExpectedListLsdOrEnd,

    /// A key path traverses through an existing value or list where a
    /// level is needed.
    KeyCollisionShouldBeLevelButIsNot,

    /// The same leaf key was written twice. Carries the offending key.
    KeyCollisionKeyAlreadyExists(String),
}

/// A parse error and the position it was raised at.
#[derive(Debug)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location (byte offsets into the input).
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::ReadFailure(e) => write!(f, "read failure: {e}"),
            ParseErrorKind::UnexpectedCharAtFileEnd => {
                write!(f, "unexpected content after the document root")
            }
            ParseErrorKind::UnexpectedStringEnd => {
                write!(f, "input ended inside a string")
            }
            ParseErrorKind::UnexpectedCharEscapeEnd => {
                write!(f, "unknown or unfinished character escape")
            }
            ParseErrorKind::UnexpectedCharInByteEscape => {
                write!(f, "malformed UTF-8 byte escape")
            }
            ParseErrorKind::UnexpectedCharInUnicodeEscape => {
                write!(f, "malformed UTF-16 escape")
            }
            ParseErrorKind::ExpectedKeyOrEnd => {
                write!(f, "expected a key or '}}'")
            }
            ParseErrorKind::ExpectedKeyPartAfterKeySeparator => {
                write!(f, "expected a key part after '.'")
            }
            ParseErrorKind::ExpectedLsdAfterKey => {
                write!(f, "expected a value, list or level after the key")
            }
            ParseErrorKind::ExpectedListLsdOrEnd => {
                write!(f, "expected a list item or ']'")
            }
            ParseErrorKind::KeyCollisionShouldBeLevelButIsNot => {
                write!(f, "key path runs through a non-level")
            }
            ParseErrorKind::KeyCollisionKeyAlreadyExists(key) => {
                write!(f, "key '{key}' already exists")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::ReadFailure(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offset() {
        let error = ParseError::new(ParseErrorKind::ExpectedKeyOrEnd, Span::empty(7));
        assert_eq!(error.to_string(), "expected a key or '}' at offset 7");
    }

    #[test]
    fn display_includes_colliding_key() {
        let error = ParseError::new(
            ParseErrorKind::KeyCollisionKeyAlreadyExists("host".to_string()),
            Span::empty(0),
        );
        assert!(error.to_string().contains("'host'"));
    }

    #[test]
    fn read_failure_exposes_source() {
        use std::error::Error;

        let cause = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let error = ParseError::new(ParseErrorKind::ReadFailure(cause), Span::empty(0));
        assert!(error.source().is_some());
    }
}
