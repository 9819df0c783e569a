//! Recursive-descent parser for path queries.
//!
//! Offsets in errors count characters from the start of the trimmed query.

use crate::ast::{JsonPath, Segment, Selector};
use crate::error::PathError;

/// Parse a path query such as `$[?(@.island=='North')].entryPoint`.
///
/// # Errors
///
/// Returns [`PathError::Empty`] for blank input and [`PathError::Syntax`]
/// for anything the grammar does not accept, including trailing text.
pub fn parse(text: &str) -> Result<JsonPath, PathError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PathError::Empty);
    }
    let mut parser = Parser::new(text);
    let path = parser.parse_path()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected '{c}' after end of path")));
    }
    Ok(path)
}

pub(crate) struct Parser {
    chars: Vec<char>,
    pub(crate) pos: usize,
}

impl Parser {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `token` if the input continues with it.
    pub(crate) fn eat_str(&mut self, token: &str) -> bool {
        let len = token.chars().count();
        let matches = self
            .chars
            .get(self.pos..self.pos + len)
            .is_some_and(|window| window.iter().copied().eq(token.chars()));
        if matches {
            self.pos += len;
        }
        matches
    }

    pub(crate) fn expect(&mut self, c: char) -> Result<(), PathError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(match self.peek() {
                Some(found) => self.error(format!("expected '{c}', found '{found}'")),
                None => self.error(format!("expected '{c}', found end of query")),
            })
        }
    }

    pub(crate) fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> PathError {
        PathError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn parse_path(&mut self) -> Result<JsonPath, PathError> {
        self.expect('$')?;
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Some('.') if self.peek_at(1) == Some('.') => {
                    self.pos += 2;
                    let selectors = match self.peek() {
                        Some('[') => self.parse_bracket()?,
                        Some('*') => {
                            self.pos += 1;
                            vec![Selector::Wildcard]
                        }
                        _ => vec![Selector::Name(self.parse_name()?)],
                    };
                    segments.push(Segment::Descendant(selectors));
                }
                Some('.') => {
                    self.pos += 1;
                    let selector = if self.eat('*') {
                        Selector::Wildcard
                    } else {
                        Selector::Name(self.parse_name()?)
                    };
                    segments.push(Segment::Child(vec![selector]));
                }
                Some('[') => segments.push(Segment::Child(self.parse_bracket()?)),
                _ => break,
            }
        }
        Ok(JsonPath { segments })
    }

    /// `[...]`: a filter, or a comma-separated union of wildcards, quoted
    /// names, indices and slices.
    fn parse_bracket(&mut self) -> Result<Vec<Selector>, PathError> {
        self.expect('[')?;
        self.skip_ws();

        if self.eat('?') {
            self.skip_ws();
            self.expect('(')?;
            let expr = self.parse_filter_expr()?;
            self.skip_ws();
            self.expect(')')?;
            self.skip_ws();
            self.expect(']')?;
            return Ok(vec![Selector::Filter(expr)]);
        }
        if self.peek() == Some('(') {
            return Err(self.error("script expressions are not supported"));
        }

        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            let selector = match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    Selector::Wildcard
                }
                Some('\'' | '"') => Selector::Name(self.parse_string()?),
                Some(c) if c == '-' || c == ':' || c.is_ascii_digit() => {
                    self.parse_index_or_slice()?
                }
                Some(c) => return Err(self.error(format!("unexpected '{c}' in brackets"))),
                None => return Err(self.error("unterminated brackets")),
            };
            selectors.push(selector);
            self.skip_ws();
            if !self.eat(',') {
                self.expect(']')?;
                return Ok(selectors);
            }
        }
    }

    fn parse_index_or_slice(&mut self) -> Result<Selector, PathError> {
        let start = self.parse_optional_int()?;
        self.skip_ws();
        if !self.eat(':') {
            return start
                .map(Selector::Index)
                .ok_or_else(|| self.error("expected an index"));
        }
        self.skip_ws();
        let end = self.parse_optional_int()?;
        self.skip_ws();
        let step = if self.eat(':') {
            self.skip_ws();
            self.parse_optional_int()?
        } else {
            None
        };
        Ok(Selector::Slice { start, end, step })
    }

    fn parse_optional_int(&mut self) -> Result<Option<i64>, PathError> {
        match self.peek() {
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_int().map(Some),
            _ => Ok(None),
        }
    }

    fn parse_int(&mut self) -> Result<i64, PathError> {
        let start = self.pos;
        self.eat('-');
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<i64>().map_err(|_| PathError::Syntax {
            offset: start,
            message: format!("invalid integer '{text}'"),
        })
    }

    /// A bare member name as written after `.`.
    pub(crate) fn parse_name(&mut self) -> Result<String, PathError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-'))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a member name, found '{c}'")),
                None => self.error("expected a member name, found end of query"),
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// A single- or double-quoted string with backslash escapes.
    pub(crate) fn parse_string(&mut self) -> Result<String, PathError> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted string")),
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }
}
