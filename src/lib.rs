//! This crate validates and tokenizes untyped lambda calculus expressions and
//! builds parse trees from the resulting tokens.

pub mod end_to_end;
pub mod lexical_analysis;
pub mod parse_tree;
pub mod parse_tree_construction;

#[cfg(test)]
mod test_helpers;

pub use lexical_analysis::{is_valid_identifier, tokenize, ScanError, Token, TokenSequence};
pub use parse_tree::{Node, ParseTree};
pub use parse_tree_construction::build_tree;
