//! Builds a parse tree from a validated token sequence. The tree's shape
//! mirrors the parenthesis nesting of the tokens.

use crate::lexical_analysis::{Token, TokenSequence};
use crate::parse_tree::{Node, ParseTree};

/// Finds the index of the `CloseParen` matching the `OpenParen` at
/// tokens[open_idx].
fn find_matching_close(tokens: &[Token], open_idx: usize) -> Option<usize> {
    let mut depth: usize = 1;

    for (offset, token) in tokens[open_idx + 1..].iter().enumerate() {
        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(open_idx + 1 + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Builds the node for the group tokens[open_idx..=close_idx]. Its children
/// are the opening bracket, the contents, and the closing bracket.
fn build_group_node(tokens: &[Token], open_idx: usize, close_idx: usize) -> Node {
    let mut group_node = Node::new(tokens[open_idx..=close_idx].to_vec());
    group_node.add_child_node(Node::leaf(tokens[open_idx].clone()));

    let inner_tokens = &tokens[open_idx + 1..close_idx];

    if inner_tokens.len() > 1 {
        group_node.add_child_node(build_subtree(inner_tokens));
    } else {
        // A single inner token hangs directly off the group.
        add_span_children(inner_tokens, &mut group_node);
    }

    group_node.add_child_node(Node::leaf(tokens[close_idx].clone()));

    return group_node;
}

/// Appends one child to `node` for every group, variable and lambda marker in
/// `tokens`, left to right.
fn add_span_children(tokens: &[Token], node: &mut Node) {
    let mut curr_idx = 0;

    while curr_idx < tokens.len() {
        match &tokens[curr_idx] {
            Token::OpenParen => match find_matching_close(tokens, curr_idx) {
                Some(close_idx) => {
                    tracing::trace!(open_idx = curr_idx, close_idx, "matched group");
                    node.add_child_node(build_group_node(tokens, curr_idx, close_idx));
                    curr_idx = close_idx + 1;
                }
                None => {
                    // Token sequences from tokenize are always balanced.
                    tracing::warn!(open_idx = curr_idx, "no closing bracket for group");
                    break;
                }
            },

            // Closers are consumed with their group, so a stray one adds nothing.
            Token::CloseParen => {
                curr_idx += 1;
            }

            token => {
                node.add_child_node(Node::leaf(token.clone()));
                curr_idx += 1;
            }
        }
    }
}

// Builds a fresh node spanning `tokens`.
fn build_subtree(tokens: &[Token]) -> Node {
    let mut node = Node::new(tokens.to_vec());
    add_span_children(tokens, &mut node);
    return node;
}

/// Builds the parse tree for a token sequence produced by `tokenize`. The
/// root spans every token.
pub fn build_tree(tokens: &TokenSequence) -> ParseTree {
    let parse_tree = ParseTree::new(build_subtree(tokens.as_slice()));

    tracing::debug!(
        token_count = tokens.len(),
        height = parse_tree.height(),
        "built parse tree"
    );

    return parse_tree;
}
