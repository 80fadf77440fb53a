//! Lexical primitives for LSD documents.
//!
//! Every reader here is peek-committed: it inspects the next character and
//! consumes only if the character belongs to its accepted set, otherwise it
//! returns `None` without disturbing the stream.

use std::io;

#[allow(unused_imports)]
use crate::trace;
use crate::error::{ParseError, ParseErrorKind};
use crate::reader::Reader;
use crate::span::Span;

/// Which production an unquoted word is being read for.
///
/// The terminator set depends on context: keys stop at structural
/// punctuation and the `.` path separator, list items stop at structural
/// punctuation, and plain values only stop at an optional caller-supplied
/// character (the `}` closing a surrounding level body).
#[derive(Clone, Copy)]
pub(crate) enum WordContext {
    Value { stop: Option<char> },
    Key,
    ListItem,
}

impl WordContext {
    fn terminates(self, ch: char) -> bool {
        if matches!(ch, ' ' | '\t' | '\r' | '\n' | '\'' | '"' | '#') {
            return true;
        }
        match self {
            WordContext::Value { stop } => stop == Some(ch),
            WordContext::Key => matches!(ch, '{' | '}' | '[' | ']' | '.'),
            WordContext::ListItem => matches!(ch, '{' | '}' | '[' | ']'),
        }
    }
}

/// Character-level reader producing the lexical pieces of the grammar.
pub(crate) struct Lexer<I> {
    reader: Reader<I>,
}

impl<I> Lexer<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    pub(crate) fn new(chars: I) -> Self {
        Self {
            reader: Reader::new(chars),
        }
    }

    /// Build a parse error at the current position.
    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, Span::empty(self.reader.pos()))
    }

    /// Look at the next character without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Option<char>, ParseError> {
        let pos = self.reader.pos();
        self.reader
            .peek()
            .map_err(|e| ParseError::new(ParseErrorKind::ReadFailure(e), Span::empty(pos)))
    }

    /// Consume the character last returned by [`Lexer::peek`].
    pub(crate) fn advance(&mut self) -> char {
        self.reader.advance()
    }

    /// Read the next character, or fail with `kind` at end of input.
    fn next_or(&mut self, kind: ParseErrorKind) -> Result<char, ParseError> {
        match self.peek()? {
            Some(_) => Ok(self.advance()),
            None => Err(self.error(kind)),
        }
    }

    /// Consume spaces and tabs, returning the run.
    ///
    /// The run is returned rather than discarded because value
    /// concatenation preserves the spacing between adjacent parts.
    pub(crate) fn lex_inline_ws(&mut self) -> Result<String, ParseError> {
        let mut run = String::new();
        while let Some(ch @ (' ' | '\t')) = self.peek()? {
            self.advance();
            run.push(ch);
        }
        Ok(run)
    }

    /// Consume whitespace, line terminators and `#` line comments.
    ///
    /// Returns whether at least one newline was crossed. Level bodies treat
    /// that signal as informational only: `{ a 1 b 2 }` parses fine on one
    /// line because values already stop at their context terminators.
    pub(crate) fn lex_structural_ws(&mut self) -> Result<bool, ParseError> {
        self.lex_inline_ws()?;

        let mut crossed_newline = false;
        let mut in_comment = false;
        loop {
            match self.peek()? {
                Some('\r' | '\n') => {
                    self.advance();
                    in_comment = false;
                    crossed_newline = true;
                }
                Some(_) if in_comment => {
                    self.advance();
                    continue;
                }
                Some('#') => {
                    self.advance();
                    in_comment = true;
                }
                _ => return Ok(crossed_newline),
            }

            self.lex_inline_ws()?;
        }
    }

    /// Read a maximal run of non-terminator characters.
    pub(crate) fn lex_word(&mut self, context: WordContext) -> Result<Option<String>, ParseError> {
        let mut word = String::new();
        while let Some(ch) = self.peek()? {
            if context.terminates(ch) {
                break;
            }
            self.advance();
            word.push(ch);
        }
        Ok((!word.is_empty()).then_some(word))
    }

    /// Read a single part: an unquoted word or a quoted string.
    fn lex_part(&mut self, context: WordContext) -> Result<Option<String>, ParseError> {
        if let Some(word) = self.lex_word(context)? {
            return Ok(Some(word));
        }
        self.lex_quoted()
    }

    /// Read a value: parts glued together with their inline spacing.
    ///
    /// `10 "px"` becomes `10 px` and `a  b` keeps both spaces. Spacing
    /// after the last part is consumed but never enters the value.
    pub(crate) fn lex_value(&mut self, context: WordContext) -> Result<Option<String>, ParseError> {
        let Some(mut value) = self.lex_part(context)? else {
            return Ok(None);
        };

        loop {
            let spacing = self.lex_inline_ws()?;
            match self.lex_part(context)? {
                Some(part) => {
                    value.push_str(&spacing);
                    value.push_str(&part);
                }
                None => break,
            }
        }

        trace!("value {:?}", value);
        Ok(Some(value))
    }

    /// Read a key part: words and strings glued with nothing in between.
    ///
    /// Inline spacing ends the part, and with it the enclosing key path.
    pub(crate) fn lex_key_part(&mut self) -> Result<Option<String>, ParseError> {
        let mut part = String::new();
        loop {
            if let Some(word) = self.lex_word(WordContext::Key)? {
                part.push_str(&word);
                continue;
            }
            if let Some(text) = self.lex_quoted()? {
                part.push_str(&text);
                continue;
            }
            break;
        }
        Ok((!part.is_empty()).then_some(part))
    }

    /// Read a quoted string, if the next character opens one.
    ///
    /// `'` and `"` both open a string; whichever opened it is the only
    /// character that closes it.
    pub(crate) fn lex_quoted(&mut self) -> Result<Option<String>, ParseError> {
        let closing = match self.peek()? {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                quote
            }
            _ => return Ok(None),
        };

        let mut text = String::new();
        loop {
            match self.next_or(ParseErrorKind::UnexpectedStringEnd)? {
                '\\' => self.lex_escape(&mut text)?,
                ch if ch == closing => {
                    trace!("string {:?}", text);
                    return Ok(Some(text));
                }
                ch => text.push(ch),
            }
        }
    }

    /// Decode one escape sequence; the `\` is already consumed.
    ///
    /// Escape letters are case-insensitive. `\"`, `\'` and `\\` are always
    /// valid regardless of which quote opened the string.
    fn lex_escape(&mut self, text: &mut String) -> Result<(), ParseError> {
        match self.next_or(ParseErrorKind::UnexpectedCharEscapeEnd)? {
            '"' => text.push('"'),
            '\'' => text.push('\''),
            '\\' => text.push('\\'),
            '0' => text.push('\0'),
            'a' | 'A' => text.push('\x07'),
            'b' | 'B' => text.push('\x08'),
            't' | 'T' => text.push('\t'),
            'n' | 'N' => text.push('\n'),
            'v' | 'V' => text.push('\x0b'),
            'f' | 'F' => text.push('\x0c'),
            'r' | 'R' => text.push('\r'),
            'x' | 'X' => text.push_str(&self.lex_byte_escape()?),
            'u' | 'U' => text.push(self.lex_unicode_escape()?),
            _ => return Err(self.error(ParseErrorKind::UnexpectedCharEscapeEnd)),
        }
        Ok(())
    }

    /// Read one hex digit. End of input counts as an unfinished string; a
    /// non-hex character fails with `invalid`.
    fn lex_hex_digit(&mut self, invalid: fn() -> ParseErrorKind) -> Result<u8, ParseError> {
        let ch = self.next_or(ParseErrorKind::UnexpectedStringEnd)?;
        match ch.to_digit(16) {
            Some(digit) => Ok(digit as u8),
            None => Err(self.error(invalid())),
        }
    }

    /// Read two hex digits as a byte.
    fn lex_hex_byte(&mut self, invalid: fn() -> ParseErrorKind) -> Result<u8, ParseError> {
        let hi = self.lex_hex_digit(invalid)?;
        let lo = self.lex_hex_digit(invalid)?;
        Ok(hi << 4 | lo)
    }

    /// Decode a `\x` escape chain into its UTF-8 text.
    ///
    /// The first byte fixes the sequence length through its leading-one
    /// count: `0xxxxxxx` stands alone, two to four leading ones demand that
    /// many bytes in total. Every continuation byte must arrive as another
    /// `\x` escape immediately after, with nothing in between. A byte with
    /// exactly one leading one (a bare continuation) or more than four can
    /// never start a sequence.
    fn lex_byte_escape(&mut self) -> Result<String, ParseError> {
        let first = self.lex_hex_byte(|| ParseErrorKind::UnexpectedCharInByteEscape)?;

        let continuations = match first.leading_ones() {
            0 => 0,
            count @ 2..=4 => count - 1,
            _ => return Err(self.error(ParseErrorKind::UnexpectedCharInByteEscape)),
        };

        let mut bytes = vec![first];
        for _ in 0..continuations {
            let introducer = (
                self.next_or(ParseErrorKind::UnexpectedStringEnd)?,
                self.next_or(ParseErrorKind::UnexpectedStringEnd)?,
            );
            if !matches!(introducer, ('\\', 'x' | 'X')) {
                return Err(self.error(ParseErrorKind::UnexpectedCharInByteEscape));
            }
            bytes.push(self.lex_hex_byte(|| ParseErrorKind::UnexpectedCharInByteEscape)?);
        }

        String::from_utf8(bytes).map_err(|_| self.error(ParseErrorKind::UnexpectedCharInByteEscape))
    }

    /// Decode a `\u` escape, pulling in a second `\u` escape when the
    /// first code unit is half of a surrogate pair.
    fn lex_unicode_escape(&mut self) -> Result<char, ParseError> {
        let first = self.lex_code_unit()?;

        // most code points are a single unit
        if let Some(Ok(ch)) = char::decode_utf16([first]).next() {
            return Ok(ch);
        }

        // surrogate half: the partner escape must follow immediately
        let introducer = (
            self.next_or(ParseErrorKind::UnexpectedStringEnd)?,
            self.next_or(ParseErrorKind::UnexpectedStringEnd)?,
        );
        if !matches!(introducer, ('\\', 'u' | 'U')) {
            return Err(self.error(ParseErrorKind::UnexpectedCharInUnicodeEscape));
        }

        let second = self.lex_code_unit()?;
        match char::decode_utf16([first, second]).next() {
            Some(Ok(ch)) => Ok(ch),
            _ => Err(self.error(ParseErrorKind::UnexpectedCharInUnicodeEscape)),
        }
    }

    /// Read four hex digits as a UTF-16 code unit.
    fn lex_code_unit(&mut self) -> Result<u16, ParseError> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let digit = self.lex_hex_digit(|| ParseErrorKind::UnexpectedCharInUnicodeEscape)?;
            unit = unit << 4 | digit as u16;
        }
        Ok(unit)
    }
}
