//! Validates a single line of lambda-calculus surface syntax and turns it into
//! a flat sequence of tokens.
//!
//! Dots are desugared while scanning: `\x. body` produces an opening
//! parenthesis where the dot was, and the matching closing parenthesis is
//! appended at the very end of the whole line (one per dot seen).

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// ASCII letters, the only characters allowed to start a variable name.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits.
pub const DIGITS: &str = "0123456789";

/// Characters with structural meaning in the surface syntax.
pub const STRUCTURAL_CHARS: [char; 4] = [OPEN_PAREN, CLOSE_PAREN, DOT, LAMBDA_MARKER];

const OPEN_PAREN: char = '(';
const CLOSE_PAREN: char = ')';
const DOT: char = '.';
const LAMBDA_MARKER: char = '\\';
const SPACE: char = ' ';

lazy_static! {
    // A letter followed by any number of letters or digits.
    static ref IDENTIFIER_RULE: Regex =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$").expect("Unable to compile identifier regex.");
}

pub fn is_letter(c: char) -> bool {
    LETTERS.contains(c)
}

pub fn is_digit(c: char) -> bool {
    DIGITS.contains(c)
}

/// Letters and digits.
pub fn is_identifier_char(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

/// Whether `c` may appear anywhere in an input line (spaces excluded).
pub fn is_valid_char(c: char) -> bool {
    is_identifier_char(c) || STRUCTURAL_CHARS.contains(&c)
}

/// Returns true if `s` is non-empty, starts with a letter, and contains only
/// letters and digits.
pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER_RULE.is_match(s)
}

/// A single token of the surface syntax.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Identifier(String),
    LambdaMarker,
    OpenParen,
    CloseParen,
}

impl Token {
    pub fn is_paren(&self) -> bool {
        matches!(self, Token::OpenParen | Token::CloseParen)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::LambdaMarker => write!(f, "{}", LAMBDA_MARKER),
            Token::OpenParen => write!(f, "{}", OPEN_PAREN),
            Token::CloseParen => write!(f, "{}", CLOSE_PAREN),
        }
    }
}

/// Joins tokens with `_`, the form used when reporting tokenized lines.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join("_")
}

/// The tokens of one successfully scanned line.
///
/// Only `tokenize` creates these, so a `TokenSequence` always has balanced,
/// non-crossing parentheses.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.0
    }
}

impl Display for TokenSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join_tokens(&self.0))
    }
}

/// Why a lambda marker was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum LambdaMarkerFault {
    #[error("invalid space after lambda marker")]
    SpaceAfterMarker,
    #[error("lambda marker not followed by a variable name")]
    NotFollowedByVariable,
}

/// Why a dot was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum DotFault {
    #[error("dot must directly follow a variable name")]
    NotPrecededByLetter,
    #[error("invalid character following dot")]
    InvalidFollowingCharacter,
}

/// Represents a scanning error. Positions are zero-based character indices
/// into the scanned line.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ScanError {
    #[error("empty input")]
    EmptyInput,

    #[error("invalid variable name ending at index {position}")]
    InvalidIdentifier { position: usize },

    #[error("invalid character {character:?} at index {position}")]
    DisallowedCharacter { character: char, position: usize },

    #[error("{fault} at index {position}")]
    MalformedLambdaMarker {
        fault: LambdaMarkerFault,
        position: usize,
    },

    #[error("{fault} at index {position}")]
    MalformedDot { fault: DotFault, position: usize },

    #[error("bracket ')' at index {position} not matched with an opening bracket '('")]
    UnmatchedCloseParen { position: usize },

    #[error("bracket '(' at index {position} not matched with a closing bracket ')'")]
    UnmatchedOpenParen { position: usize },
}

impl ScanError {
    /// The character index the error refers to, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::EmptyInput => None,
            Self::InvalidIdentifier { position }
            | Self::DisallowedCharacter { position, .. }
            | Self::MalformedLambdaMarker { position, .. }
            | Self::MalformedDot { position, .. }
            | Self::UnmatchedCloseParen { position }
            | Self::UnmatchedOpenParen { position } => Some(*position),
        }
    }
}

// Finds the exclusive end of the identifier run starting at start_idx.
fn identifier_run_end(chars: &[char], start_idx: usize) -> usize {
    chars[start_idx..]
        .iter()
        .position(|&c| !is_identifier_char(c))
        .map_or(chars.len(), |offset| start_idx + offset)
}

// A lambda marker must be immediately followed by a letter.
fn check_lambda_marker(chars: &[char], marker_idx: usize) -> Result<(), ScanError> {
    match chars.get(marker_idx + 1) {
        Some(&next_char) if is_letter(next_char) => Ok(()),
        Some(&SPACE) => Err(ScanError::MalformedLambdaMarker {
            fault: LambdaMarkerFault::SpaceAfterMarker,
            position: marker_idx,
        }),
        _ => Err(ScanError::MalformedLambdaMarker {
            fault: LambdaMarkerFault::NotFollowedByVariable,
            position: marker_idx,
        }),
    }
}

// A dot must directly follow a letter, and the first non-space character
// after it must start a variable name, a group, or a lambda.
fn check_dot(chars: &[char], dot_idx: usize) -> Result<(), ScanError> {
    let preceded_by_letter = dot_idx > 0 && is_letter(chars[dot_idx - 1]);

    if !preceded_by_letter {
        return Err(ScanError::MalformedDot {
            fault: DotFault::NotPrecededByLetter,
            position: dot_idx,
        });
    }

    let next_non_space = chars[dot_idx + 1..].iter().find(|&&c| c != SPACE);

    match next_non_space {
        Some(&c) if is_letter(c) || c == OPEN_PAREN || c == LAMBDA_MARKER => Ok(()),
        _ => Err(ScanError::MalformedDot {
            fault: DotFault::InvalidFollowingCharacter,
            position: dot_idx,
        }),
    }
}

/// Scans `input` left to right, validating it and producing its tokens.
///
/// Spaces are skipped. Every dot emits an opening parenthesis in place and
/// one closing parenthesis appended after the whole line has been scanned,
/// so each dot-introduced body extends to the end of the line.
///
/// Explicit parentheses must pair up without crossing. With more closers
/// than openers the last closer that had nothing to close is reported; with
/// more openers the first opener left unclosed is reported. Equal counts that
/// still cross (`)x(`) are reported at the unmatched closer.
///
/// A line holding nothing but spaces yields no tokens and is rejected as
/// `EmptyInput`, like the empty string.
pub fn tokenize(input: &str) -> Result<TokenSequence, ScanError> {
    let chars: Vec<char> = input.chars().collect();

    if chars.is_empty() {
        tracing::debug!("rejected empty input");
        return Err(ScanError::EmptyInput);
    }

    let mut tokens = Vec::new();
    let mut dot_count: usize = 0;
    let mut open_paren_positions: Vec<usize> = Vec::new();
    let mut unmatched_close_positions: Vec<usize> = Vec::new();

    let mut curr_idx = 0;

    while curr_idx < chars.len() {
        let curr_char = chars[curr_idx];

        if curr_char != SPACE && !is_valid_char(curr_char) {
            return Err(ScanError::DisallowedCharacter {
                character: curr_char,
                position: curr_idx,
            });
        }

        if is_identifier_char(curr_char) {
            let run_end = identifier_run_end(&chars, curr_idx);
            let run: String = chars[curr_idx..run_end].iter().collect();

            if !is_valid_identifier(&run) {
                return Err(ScanError::InvalidIdentifier {
                    position: run_end - 1,
                });
            }

            tokens.push(Token::Identifier(run));
            curr_idx = run_end;
            continue;
        }

        match curr_char {
            LAMBDA_MARKER => {
                check_lambda_marker(&chars, curr_idx)?;
                tokens.push(Token::LambdaMarker);
            }
            DOT => {
                check_dot(&chars, curr_idx)?;
                tokens.push(Token::OpenParen);
                dot_count += 1;
            }
            OPEN_PAREN => {
                tokens.push(Token::OpenParen);
                open_paren_positions.push(curr_idx);
            }
            CLOSE_PAREN => {
                tokens.push(Token::CloseParen);
                if open_paren_positions.pop().is_none() {
                    unmatched_close_positions.push(curr_idx);
                }
            }
            // Space.
            _ => {}
        }

        curr_idx += 1;
    }

    if tokens.is_empty() {
        tracing::debug!("rejected blank input");
        return Err(ScanError::EmptyInput);
    }

    // Closers minus openers equals unmatched closers minus unclosed openers.
    if open_paren_positions.len() > unmatched_close_positions.len() {
        if let Some(&position) = open_paren_positions.first() {
            return Err(ScanError::UnmatchedOpenParen { position });
        }
    }

    if let Some(&position) = unmatched_close_positions.last() {
        return Err(ScanError::UnmatchedCloseParen { position });
    }

    tokens.extend(std::iter::repeat(Token::CloseParen).take(dot_count));

    tracing::debug!(
        token_count = tokens.len(),
        dot_count,
        "tokenized {:?}",
        input
    );

    Ok(TokenSequence(tokens))
}
