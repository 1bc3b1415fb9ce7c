//! Surface syntax: a whitespace-sensitive, lossless concrete syntax tree with
//! its parser, printer and normalizer.
//!
//! For every input accepted by [`parse`], `print(&parse(s)?) == s`.

mod ast;
pub mod combinators;
mod parser;
mod pretty;
mod printer;

pub use ast::{Cst, Document, Node};
pub use combinators::{ParseError, ParseState};
pub use parser::{
    parse, parse_happ, parse_name, parse_num_lit, parse_paren, parse_term0, parse_term1,
    parse_term2, parse_top_level, parse_vapp,
};
pub use pretty::{pretty, pretty_top_level};
pub use printer::{print, print_top_level};

#[cfg(test)]
mod tests;
