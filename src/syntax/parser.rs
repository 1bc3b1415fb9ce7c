//! Recursive-descent grammar for Gallium programs.
//!
//! ```text
//! term0 = vapp | term1
//! term1 = happ | term2
//! term2 = paren | name | numlit
//! ```
//!
//! A vertical application puts its head on one line and its arguments on
//! the following lines, all indented to the same column, deeper than the
//! enclosing block. Every space, blank line and comment that separates two
//! tokens is kept on the node so that printing restores the input.

use lazy_static::lazy_static;
use regex::Regex;

use super::ast::{Cst, Document, Node};
use super::combinators::{
    ParseError, ParseResult, ParseState, Parser, alternate, constant, head_indent, many,
    newline, pattern, pop_indent, push_indent, spaces, with_fallback,
};

lazy_static! {
    static ref NAME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*").expect("valid regex");
    static ref NUMBER: Regex = Regex::new(r"^(?:\d+\.?\d*|\.\d+)").expect("valid regex");
    /// Spaces and a comment before the end of a line.
    static ref LINE_FILLER: Regex = Regex::new(r"^(?: |#[^\n]*)*").expect("valid regex");
    /// Whole lines holding nothing but whitespace and comments.
    static ref BLANK_LINES: Regex = Regex::new(r"^(?:\s|#[^\n]*)*\n").expect("valid regex");
    static ref TRAILING: Regex = Regex::new(r"^(?:\s|#[^\n]*)*").expect("valid regex");
}

pub fn parse_name(state: &mut ParseState) -> ParseResult<Cst> {
    let value = pattern(&NAME, "not a name").parse(state)?;
    Ok(Node::name(value))
}

pub fn parse_num_lit(state: &mut ParseState) -> ParseResult<Cst> {
    let raw = pattern(&NUMBER, "not a number").parse(state)?;
    match raw.parse::<f64>() {
        Ok(value) => Ok(Node::NumLit {
            value,
            raw,
            payload: (),
        }),
        Err(_) => state.fail("not a number"),
    }
}

fn optional_spaces(state: &mut ParseState) -> ParseResult<String> {
    with_fallback(spaces, String::new()).parse(state)
}

fn blank_lines(state: &mut ParseState) -> ParseResult<String> {
    with_fallback(pattern(&BLANK_LINES, "expected blank lines"), String::new()).parse(state)
}

/// The text between the end of one line's code and the start of the next
/// line's code.
struct Gap {
    /// Everything but the final newline and the indentation.
    extra: String,
    indent: usize,
}

fn line_gap(state: &mut ParseState) -> ParseResult<Gap> {
    let trailing = pattern(&LINE_FILLER, "expected end of line").parse(state)?;
    newline(state)?;
    let blank = blank_lines(state)?;
    let indent = optional_spaces(state)?.len();
    let extra = match blank.strip_suffix('\n') {
        Some(lines) => format!("{}\n{}", trailing, lines),
        None => trailing,
    };
    Ok(Gap { extra, indent })
}

fn increased_indentation_newline(state: &mut ParseState) -> ParseResult<Gap> {
    let current = head_indent(state)?;
    let gap = line_gap(state)?;
    if gap.indent <= current {
        return state.fail("no increased indentation");
    }
    push_indent(gap.indent).parse(state)?;
    Ok(gap)
}

fn same_indentation_newline(state: &mut ParseState) -> ParseResult<String> {
    let current = head_indent(state)?;
    let gap = line_gap(state)?;
    if gap.indent != current {
        return state.fail("not same indentation");
    }
    Ok(gap.extra)
}

/// Further children of a block, each on its own line at the block's column.
fn block_siblings(state: &mut ParseState) -> ParseResult<Vec<(String, Cst)>> {
    many(|state: &mut ParseState| -> ParseResult<(String, Cst)> {
        let extra = same_indentation_newline(state)?;
        let child = parse_term0(state)?;
        Ok((extra, child))
    })
    .parse(state)
}

pub fn parse_vapp(state: &mut ParseState) -> ParseResult<Cst> {
    let head = parse_term1(state)?;
    let Gap { extra, indent } = increased_indentation_newline(state)?;
    let first = parse_term0(state)?;
    let mut children = vec![head, first];
    let mut extra_spaces = vec![extra];
    for (extra, child) in block_siblings(state)? {
        extra_spaces.push(extra);
        children.push(child);
    }
    pop_indent(state)?;
    Ok(Node::VApp {
        children,
        indent,
        extra_spaces,
        payload: (),
    })
}

fn happ_argument(state: &mut ParseState) -> ParseResult<(String, Cst)> {
    let space = optional_spaces(state)?;
    let child = parse_term2(state)?;
    Ok((space, child))
}

pub fn parse_happ(state: &mut ParseState) -> ParseResult<Cst> {
    let head = parse_term2(state)?;
    let (space, second) = happ_argument(state)?;
    let mut children = vec![head, second];
    let mut separators = vec![space];
    for (space, child) in many(happ_argument).parse(state)? {
        separators.push(space);
        children.push(child);
    }
    Ok(Node::HApp {
        children,
        spaces: separators,
        payload: (),
    })
}

pub fn parse_paren(state: &mut ParseState) -> ParseResult<Cst> {
    constant("(").parse(state)?;
    let before = optional_spaces(state)?;
    let child = parse_term1(state)?;
    let after = optional_spaces(state)?;
    constant(")").parse(state)?;
    Ok(Node::Paren {
        child: Box::new(child),
        spaces: [before, after],
        payload: (),
    })
}

pub fn parse_term2(state: &mut ParseState) -> ParseResult<Cst> {
    alternate::<Cst>(&[&parse_paren, &parse_name, &parse_num_lit]).parse(state)
}

pub fn parse_term1(state: &mut ParseState) -> ParseResult<Cst> {
    alternate::<Cst>(&[&parse_happ, &parse_term2]).parse(state)
}

pub fn parse_term0(state: &mut ParseState) -> ParseResult<Cst> {
    alternate::<Cst>(&[&parse_vapp, &parse_term1]).parse(state)
}

/// The whole program as the body of an implicit `do` block at column zero.
/// The first extra space holds the blank lines before the first expression.
fn parse_top_level_expr(state: &mut ParseState) -> ParseResult<Cst> {
    let leading = blank_lines(state)?;
    let first = parse_term0(state)?;
    let mut children = vec![Node::name("do"), first];
    let mut extra_spaces = vec![leading];
    for (extra, child) in block_siblings(state)? {
        extra_spaces.push(extra);
        children.push(child);
    }
    Ok(Node::VApp {
        children,
        indent: 0,
        extra_spaces,
        payload: (),
    })
}

/// Consumes trailing whitespace and comments, then requires the input to be
/// exhausted. Returns the consumed text.
fn end_of_input(state: &mut ParseState) -> ParseResult<String> {
    let trailing = pattern(&TRAILING, "expected end of input").parse(state)?;
    if state.is_at_end() {
        return Ok(trailing);
    }
    let position = state.position();
    if let Some(err) = state.furthest_error().filter(|err| err.offset > position) {
        return Err(err.clone());
    }
    state.fail("unexpected trailing input")
}

fn run(input: &str, parser: impl Parser<Cst>) -> Result<Document, ParseError> {
    let mut state = ParseState::new(input);
    let tree = parser
        .parse(&mut state)
        .map_err(|err| state.furthest_error().cloned().unwrap_or(err))?;
    let trailing = end_of_input(&mut state)?;
    Ok(Document { tree, trailing })
}

/// Parses a single expression.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    run(input, parse_term0)
}

/// Parses a program: a sequence of expressions at column zero, wrapped in a
/// `do` block.
pub fn parse_top_level(input: &str) -> Result<Document, ParseError> {
    run(input, parse_top_level_expr)
}
