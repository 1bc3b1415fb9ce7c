//! Backtracking parser combinators over a checkpointed cursor.
//!
//! A [`Parser`] either consumes a prefix of the remaining input and returns a
//! value, or fails. A failed parser may leave the [`ParseState`] anywhere:
//! combinators that backtrack take a [`Checkpoint`] first and restore it on
//! failure.

use std::fmt;
use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACES: Regex = Regex::new(r"^ +").expect("valid regex");
}

/// A syntax error, located at the furthest point the parser reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over the source text plus the stack of active indentation levels.
pub struct ParseState {
    source: Rc<str>,
    pos: usize,
    indents: Vec<usize>,
    furthest: Option<ParseError>,
}

/// Snapshot of a [`ParseState`] cursor, taken before trying an alternative.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pos: usize,
    indents: Vec<usize>,
}

impl fmt::Debug for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseState")
            .field("rest", &self.rest())
            .field("indents", &self.indents)
            .finish()
    }
}

impl ParseState {
    pub fn new(source: &str) -> Self {
        Self::with_indents(source, vec![0])
    }

    pub fn with_indents(source: &str, indents: Vec<usize>) -> Self {
        ParseState {
            source: Rc::from(source),
            pos: 0,
            indents,
            furthest: None,
        }
    }

    /// The input that has not been consumed yet.
    pub fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn indents(&self) -> &[usize] {
        &self.indents
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            indents: self.indents.clone(),
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.indents = checkpoint.indents;
    }

    fn advance(&mut self, len: usize) {
        self.pos += len;
    }

    /// Builds an error at the current position without recording it.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let consumed = &self.source[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed
            .rfind('\n')
            .map_or(consumed.chars().count(), |i| consumed[i + 1..].chars().count())
            + 1;
        ParseError {
            message: message.into(),
            offset: self.pos,
            line,
            column,
        }
    }

    /// Fails at the current position, remembering the error if it is the
    /// furthest one seen so far.
    pub fn fail<T>(&mut self, message: impl Into<String>) -> ParseResult<T> {
        let err = self.error(message);
        let further = self
            .furthest
            .as_ref()
            .is_none_or(|known| err.offset >= known.offset);
        if further {
            self.furthest = Some(err.clone());
        }
        Err(err)
    }

    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest.as_ref()
    }
}

pub trait Parser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F> Parser<T> for F
where
    F: Fn(&mut ParseState) -> ParseResult<T>,
{
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}

/// Consumes `literal` if the remaining input starts with it.
pub fn constant(literal: &'static str) -> impl Parser<&'static str> {
    move |state: &mut ParseState| {
        if state.rest().starts_with(literal) {
            state.advance(literal.len());
            Ok(literal)
        } else {
            state.fail(format!("could not find constant {:?}", literal))
        }
    }
}

/// Consumes the match of `regex` at the start of the remaining input.
/// The regex must be anchored with `^`.
pub fn pattern(regex: &'static Regex, expected: &'static str) -> impl Parser<String> {
    move |state: &mut ParseState| {
        let matched = regex
            .find(state.rest())
            .filter(|m| m.start() == 0)
            .map(|m| m.as_str().to_owned());
        match matched {
            Some(text) => {
                state.advance(text.len());
                Ok(text)
            }
            None => state.fail(expected),
        }
    }
}

/// Tries each option in order from the same starting point; the first one
/// that succeeds wins.
pub fn alternate<'p, T>(options: &'p [&'p dyn Parser<T>]) -> impl Parser<T> + 'p {
    move |state: &mut ParseState| {
        for option in options {
            let checkpoint = state.checkpoint();
            match option.parse(state) {
                Ok(value) => return Ok(value),
                Err(_) => state.restore(checkpoint),
            }
        }
        state.fail("alternation failed")
    }
}

pub fn with_fallback<T: Clone>(parser: impl Parser<T>, default: T) -> impl Parser<T> {
    move |state: &mut ParseState| {
        let checkpoint = state.checkpoint();
        parser.parse(state).or_else(|_| {
            state.restore(checkpoint);
            Ok(default.clone())
        })
    }
}

pub fn maybe<T>(parser: impl Parser<T>) -> impl Parser<Option<T>> {
    move |state: &mut ParseState| {
        let checkpoint = state.checkpoint();
        match parser.parse(state) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                state.restore(checkpoint);
                Ok(None)
            }
        }
    }
}

/// Applies `parser` until it fails, backtracking over the failed attempt.
pub fn many<T>(parser: impl Parser<T>) -> impl Parser<Vec<T>> {
    move |state: &mut ParseState| {
        let mut values = Vec::new();
        loop {
            let checkpoint = state.checkpoint();
            match parser.parse(state) {
                Ok(value) => values.push(value),
                Err(_) => {
                    state.restore(checkpoint);
                    return Ok(values);
                }
            }
        }
    }
}

/// One or more spaces.
pub fn spaces(state: &mut ParseState) -> ParseResult<String> {
    pattern(&SPACES, "expected spaces").parse(state)
}

pub fn newline(state: &mut ParseState) -> ParseResult<&'static str> {
    constant("\n").parse(state)
}

pub fn head_indent(state: &mut ParseState) -> ParseResult<usize> {
    match state.indents.last() {
        Some(indent) => Ok(*indent),
        None => state.fail("indentation stack is empty"),
    }
}

pub fn push_indent(indent: usize) -> impl Parser<()> {
    move |state: &mut ParseState| {
        state.indents.push(indent);
        Ok(())
    }
}

pub fn pop_indent(state: &mut ParseState) -> ParseResult<()> {
    match state.indents.pop() {
        Some(_) => Ok(()),
        None => state.fail("indentation stack is empty"),
    }
}
