//! Recursive-descent parser for LSD documents.
//!
//! The grammar is LL(1): every rule commits as soon as it sees its anchor
//! character, and a single character of lookahead is enough everywhere.
//! Levels accumulate entries through a merge that expands dotted key paths
//! and reconciles repeated prefixes across separate entries.

use std::io;

use indexmap::map::Entry;

#[allow(unused_imports)]
use crate::trace;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, WordContext};
use crate::value::{Level, List, Lsd};


/// Parser over a decoded character stream.
///
/// ```
/// use std::io;
///
/// use lsd_parse::{Lsd, Parser};
///
/// let chars = "a 10".chars().map(Ok::<_, io::Error>);
/// let tree = Parser::new(chars).parse().unwrap();
/// assert!(matches!(tree, Lsd::Level(_)));
/// ```
pub struct Parser<I> {
    lexer: Lexer<I>,
}

impl<I> Parser<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    /// Create a parser over a character stream.
    pub fn new(chars: I) -> Self {
        Self {
            lexer: Lexer::new(chars),
        }
    }

    /// Consume the whole stream and return the document tree.
    ///
    /// The root is a list for `[ ... ]` inputs and a level for `{ ... }`
    /// inputs; anything else is read as an unbraced level body, so an empty
    /// or comment-only document yields an empty level.
    pub fn parse(mut self) -> Result<Lsd, ParseError> {
        self.lexer.lex_structural_ws()?;

        if let Some(list) = self.parse_list()? {
            self.expect_end_of_input()?;
            return Ok(Lsd::List(list));
        }

        if let Some(level) = self.parse_level()? {
            self.expect_end_of_input()?;
            return Ok(Lsd::Level(level));
        }

        self.parse_level_body(false).map(Lsd::Level)
    }

    /// Fail unless only whitespace and comments remain.
    fn expect_end_of_input(&mut self) -> Result<(), ParseError> {
        self.lexer.lex_structural_ws()?;
        match self.lexer.peek()? {
            None => Ok(()),
            Some(_) => Err(self.lexer.error(ParseErrorKind::UnexpectedCharAtFileEnd)),
        }
    }

    /// Read one node: list, level, or value, tried in that order.
    ///
    /// The order makes a leading `[` or `{` always open a container; no
    /// value can begin with either character.
    fn parse_node(&mut self) -> Result<Option<Lsd>, ParseError> {
        if let Some(list) = self.parse_list()? {
            return Ok(Some(Lsd::List(list)));
        }
        if let Some(level) = self.parse_level()? {
            return Ok(Some(Lsd::Level(level)));
        }
        // a value on the right-hand side of a key stops at the brace that
        // would close the surrounding level body
        let value = self.lexer.lex_value(WordContext::Value { stop: Some('}') })?;
        Ok(value.map(Lsd::Value))
    }

    /// Read a braced level, if the next character is `{`.
    fn parse_level(&mut self) -> Result<Option<Level>, ParseError> {
        match self.lexer.peek()? {
            Some('{') => {
                self.lexer.advance();
            }
            _ => return Ok(None),
        }
        trace!("level start");

        self.lexer.lex_structural_ws()?;
        self.parse_level_body(true).map(Some)
    }

    /// Read key-node entries until the body terminator.
    ///
    /// Braced bodies demand a `}`; unbraced bodies (the document root form)
    /// simply stop once no further key can be read.
    fn parse_level_body(&mut self, braced: bool) -> Result<Level, ParseError> {
        let mut level = Level::new();
        loop {
            if braced && self.lexer.peek()? == Some('}') {
                self.lexer.advance();
                break;
            }

            let Some(path) = self.parse_key_path()? else {
                if braced {
                    return Err(self.lexer.error(ParseErrorKind::ExpectedKeyOrEnd));
                }
                break;
            };

            self.lexer.lex_structural_ws()?;

            let node = match self.parse_node()? {
                Some(node) => node,
                None => return Err(self.lexer.error(ParseErrorKind::ExpectedLsdAfterKey)),
            };

            self.lexer.lex_structural_ws()?;

            self.merge_entry(&mut level, &path, node)?;
        }
        Ok(level)
    }

    /// Read a `.`-separated key path, if a key part starts here.
    fn parse_key_path(&mut self) -> Result<Option<Vec<String>>, ParseError> {
        let Some(first) = self.lexer.lex_key_part()? else {
            return Ok(None);
        };

        let mut parts = vec![first];
        while self.lexer.peek()? == Some('.') {
            self.lexer.advance();
            match self.lexer.lex_key_part()? {
                Some(part) => parts.push(part),
                None => {
                    return Err(self
                        .lexer
                        .error(ParseErrorKind::ExpectedKeyPartAfterKeySeparator));
                }
            }
        }

        trace!("key path {:?}", parts);
        Ok(Some(parts))
    }

    /// Expand a dotted path into nested single-entry levels and merge the
    /// result into the accumulator.
    fn merge_entry(
        &mut self,
        level: &mut Level,
        path: &[String],
        node: Lsd,
    ) -> Result<(), ParseError> {
        let (leaf, ancestors) = path.split_last().expect("key paths are non-empty");

        let mut subtree = Level::new();
        subtree.insert(leaf.clone(), node);
        for part in ancestors.iter().rev() {
            let mut wrapper = Level::new();
            wrapper.insert(part.clone(), Lsd::Level(subtree));
            subtree = wrapper;
        }

        self.merge_level(level, subtree)
    }

    /// Merge `incoming` into `target`.
    ///
    /// Levels merge recursively, so `a.b` and `a.c` end up in one `a`.
    /// Values and lists collide when their key already exists, and a level
    /// never merges over a value or list.
    fn merge_level(&mut self, target: &mut Level, incoming: Level) -> Result<(), ParseError> {
        for (key, node) in incoming {
            match node {
                Lsd::Level(inner) => match target.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(Lsd::Level(inner));
                    }
                    Entry::Occupied(mut slot) => match slot.get_mut() {
                        Lsd::Level(existing) => self.merge_level(existing, inner)?,
                        Lsd::Value(_) | Lsd::List(_) => {
                            return Err(self
                                .lexer
                                .error(ParseErrorKind::KeyCollisionShouldBeLevelButIsNot));
                        }
                    },
                },
                node => match target.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(node);
                    }
                    Entry::Occupied(slot) => {
                        let key = slot.key().clone();
                        return Err(self
                            .lexer
                            .error(ParseErrorKind::KeyCollisionKeyAlreadyExists(key)));
                    }
                },
            }
        }
        Ok(())
    }

    /// Read a bracketed list, if the next character is `[`.
    fn parse_list(&mut self) -> Result<Option<List>, ParseError> {
        match self.lexer.peek()? {
            Some('[') => {
                self.lexer.advance();
            }
            _ => return Ok(None),
        }
        trace!("list start");

        self.lexer.lex_structural_ws()?;

        let mut list = List::new();
        loop {
            if self.lexer.peek()? == Some(']') {
                self.lexer.advance();
                break;
            }

            match self.parse_list_item()? {
                Some(item) => list.push(item),
                None => return Err(self.lexer.error(ParseErrorKind::ExpectedListLsdOrEnd)),
            }

            self.lexer.lex_structural_ws()?;
        }
        Ok(Some(list))
    }

    /// Read one list item: nested list, level, or a list-context value.
    ///
    /// List values use the stricter terminator set, so unquoted brackets
    /// and braces never leak into an item's text.
    fn parse_list_item(&mut self) -> Result<Option<Lsd>, ParseError> {
        if let Some(list) = self.parse_list()? {
            return Ok(Some(Lsd::List(list)));
        }
        if let Some(level) = self.parse_level()? {
            return Ok(Some(Lsd::Level(level)));
        }
        let value = self.lexer.lex_value(WordContext::ListItem)?;
        Ok(value.map(Lsd::Value))
    }
}
