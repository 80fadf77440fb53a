//! High-level API for LSD ("Less Syntax Data") documents.
//!
//! LSD is a configuration and data-interchange format with deliberately
//! little syntax: values are unquoted words or quoted strings, lists live in
//! `[ ... ]`, and levels (insertion-ordered maps) live in `{ ... }` or span
//! the whole file. This crate parses documents from strings, readers and
//! files, and pulls typed leaves back out of the tree by path.
//!
//! ```
//! use lsd_tree::{Navigate, parse_str, path};
//!
//! let config = parse_str("server.host localhost\nserver.port 8080").unwrap();
//!
//! let host = config
//!     .value(|| "host should be a value", path!["server" "host"])
//!     .unwrap()
//!     .expect("host is configured");
//! assert_eq!(host, "localhost");
//!
//! let port: u16 = config
//!     .parsed(|| "port should be a number", path!["server" "port"])
//!     .unwrap()
//!     .expect("port is configured");
//! assert_eq!(port, 8080);
//! ```

mod diagnostic;
pub mod path;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use utf8_chars::BufReadCharsExt;

pub use lsd_parse::{Level, List, Lsd, ParseError, ParseErrorKind, Parser, Span, Value};

pub use diagnostic::Diagnostic;
pub use path::{KeyPath, Navigate, PathSegment};

/// Parse an LSD document from a reader.
///
/// The input is buffered, decoded as UTF-8 and consumed to the end. I/O
/// failures surface as [`ParseErrorKind::ReadFailure`].
pub fn parse(input: impl Read) -> Result<Lsd, ParseError> {
    let mut input = BufReader::new(input);
    Parser::new(input.chars()).parse()
}

/// Parse an LSD document from a string.
pub fn parse_str(source: &str) -> Result<Lsd, ParseError> {
    Parser::new(source.chars().map(Ok)).parse()
}

/// Parse the LSD file at `path`.
///
/// The file is opened, parsed and closed here; failing to open it surfaces
/// as [`ParseErrorKind::ReadFailure`] like any other I/O problem.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Lsd, ParseError> {
    let file = File::open(path)
        .map_err(|e| ParseError::new(ParseErrorKind::ReadFailure(e), Span::empty(0)))?;
    parse(file)
}
