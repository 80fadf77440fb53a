//! Diagnostic rendering for parse errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use lsd_parse::{ParseError, ParseErrorKind, Span};

/// Render parse errors as labeled source reports.
///
/// Rendering needs the original source text, so it lives here rather than
/// on the parser, which may have consumed a non-rewindable stream.
pub trait Diagnostic {
    /// Render with source context, returning the formatted report.
    fn render(&self, filename: &str, source: &str) -> String;

    /// Write the report to a writer.
    fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W);
}

impl Diagnostic for ParseError {
    fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = build_report(self, filename, source.len());
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }
}

/// Clamp an error span into the source so end-of-input errors still point
/// at something renderable.
fn clamp(span: Span, source_len: usize) -> std::ops::Range<usize> {
    let start = (span.start as usize).min(source_len);
    let end = (span.end as usize).clamp(start, source_len);
    if start < end {
        return start..end;
    }
    // widen a zero-width span to the nearest character
    if start < source_len {
        start..start + 1
    } else if start > 0 {
        start - 1..start
    } else {
        0..0
    }
}

fn build_report<'a>(
    error: &ParseError,
    filename: &'a str,
    source_len: usize,
) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
    let range = clamp(error.span, source_len);

    match &error.kind {
        ParseErrorKind::ReadFailure(cause) => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message(format!("could not read the input: {cause}"))
                .with_label(
                    Label::new((filename, range))
                        .with_message("reading failed around here")
                        .with_color(Color::Red),
                )
        }

        ParseErrorKind::UnexpectedCharAtFileEnd => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("unexpected content after the document root")
                .with_label(
                    Label::new((filename, range))
                        .with_message("nothing may follow the closing bracket or brace")
                        .with_color(Color::Red),
                )
                .with_help("a document holds exactly one root list or level")
        }

        ParseErrorKind::UnexpectedStringEnd => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("input ended inside a string")
                .with_label(
                    Label::new((filename, range))
                        .with_message("the string is still open here")
                        .with_color(Color::Red),
                )
                .with_help("close the string with the same quote that opened it")
        }

        ParseErrorKind::UnexpectedCharEscapeEnd => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("unknown or unfinished character escape")
                .with_label(
                    Label::new((filename, range))
                        .with_message("not a valid escape")
                        .with_color(Color::Red),
                )
                .with_help(
                    "valid escapes are \\\" \\' \\\\ \\0 \\a \\b \\t \\n \\v \\f \\r, \\xHH and \\uHHHH",
                )
        }

        ParseErrorKind::UnexpectedCharInByteEscape => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("malformed UTF-8 byte escape")
                .with_label(
                    Label::new((filename, range))
                        .with_message("this \\x sequence does not form UTF-8")
                        .with_color(Color::Red),
                )
                .with_help(
                    "a multi-byte \\x escape needs its continuation bytes as further \\x escapes, with nothing in between",
                )
        }

        ParseErrorKind::UnexpectedCharInUnicodeEscape => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("malformed UTF-16 escape")
                .with_label(
                    Label::new((filename, range))
                        .with_message("this \\u sequence does not form a code point")
                        .with_color(Color::Red),
                )
                .with_help("a surrogate half must be followed by its partner \\u escape")
        }

        ParseErrorKind::ExpectedKeyOrEnd => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("expected a key or '}'")
                .with_label(
                    Label::new((filename, range))
                        .with_message("a level entry or the closing brace should be here")
                        .with_color(Color::Red),
                )
        }

        ParseErrorKind::ExpectedKeyPartAfterKeySeparator => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("expected a key part after '.'")
                .with_label(
                    Label::new((filename, range))
                        .with_message("the key path ends in a separator")
                        .with_color(Color::Red),
                )
                .with_help("every '.' in a key path must be followed by another part")
        }

        ParseErrorKind::ExpectedLsdAfterKey => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("expected a value, list or level after the key")
                .with_label(
                    Label::new((filename, range))
                        .with_message("the key has no payload")
                        .with_color(Color::Red),
                )
        }

        ParseErrorKind::ExpectedListLsdOrEnd => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("expected a list item or ']'")
                .with_label(
                    Label::new((filename, range))
                        .with_message("a list item or the closing bracket should be here")
                        .with_color(Color::Red),
                )
        }

        ParseErrorKind::KeyCollisionShouldBeLevelButIsNot => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message("key path runs through a non-level")
                .with_label(
                    Label::new((filename, range))
                        .with_message("an earlier entry already put a value or list on this path")
                        .with_color(Color::Red),
                )
                .with_help("dotted paths can only descend through levels")
        }

        ParseErrorKind::KeyCollisionKeyAlreadyExists(key) => {
            Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message(format!("key '{key}' already exists"))
                .with_label(
                    Label::new((filename, range))
                        .with_message("second write to the same key")
                        .with_color(Color::Red),
                )
                .with_help("each key may be assigned once per level")
        }
    }
}
