//! Data structures to represent the parse tree of a tokenized line, and some
//! utility functions to traverse and display it.

use std::fmt::Display;

use crate::lexical_analysis::{join_tokens, Token};

/// Prefix repeated once per nesting level when rendering a tree.
pub const LEVEL_PREFIX: &str = "----";

/// A node of the parse tree. `elem` holds the tokens the node spans.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Node {
    pub elem: Vec<Token>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(elem: Vec<Token>) -> Self {
        Node {
            elem,
            children: Vec::new(),
        }
    }

    /// A childless node spanning a single token.
    pub fn leaf(token: Token) -> Self {
        Node::new(vec![token])
    }

    pub fn add_child_node(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below this node (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A full parse tree, owning its root node.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseTree {
    pub root: Node,
}

// Collects the tokens of every leaf, left to right.
fn collect_leaf_tokens<'a>(node: &'a Node, tokens_so_far: &mut Vec<&'a Token>) {
    if node.is_leaf() {
        tokens_so_far.extend(node.elem.iter());
        return;
    }

    for child in &node.children {
        collect_leaf_tokens(child, tokens_so_far);
    }
}

// Helper function to produce one rendered line per node, depth first.
fn parse_tree_to_lines_helper(node: &Node, depth: usize, lines_so_far: &mut Vec<String>) {
    lines_so_far.push(format!(
        "{}{}",
        LEVEL_PREFIX.repeat(depth),
        join_tokens(&node.elem)
    ));

    for child in &node.children {
        parse_tree_to_lines_helper(child, depth + 1, lines_so_far);
    }
}

impl ParseTree {
    pub fn new(root: Node) -> Self {
        ParseTree { root }
    }

    /// Tokens held by the leaves of the tree, in order.
    pub fn leaf_tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        collect_leaf_tokens(&self.root, &mut out);
        return out;
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }
}

/// Renders a tree as one line per node: the node's tokens joined by `_`,
/// indented by `LEVEL_PREFIX` once per level of nesting.
pub fn parse_tree_to_string(parse_tree: &ParseTree) -> String {
    let mut lines = Vec::new();
    parse_tree_to_lines_helper(&parse_tree.root, 0, &mut lines);
    return lines.join("\n");
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", parse_tree_to_string(self));
    }
}
