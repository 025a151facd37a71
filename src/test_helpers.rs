//! Shared helpers for unit and property tests.

use proptest::prelude::*;

use crate::lexical_analysis::Token;

pub fn ident(name: &str) -> Token {
    Token::Identifier(String::from(name))
}

/// Generates expressions that the tokenizer must accept: variables,
/// lambdas (with and without a space after the dot), parenthesized groups and
/// applications.
pub fn well_formed_expression() -> impl Strategy<Value = String> {
    let variable = "[a-z][a-zA-Z0-9]{0,3}";

    variable.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            ("[a-z]{1,3}", inner.clone())
                .prop_map(|(binder, body)| format!("\\{}.{}", binder, body)),
            ("[a-z]{1,3}", inner.clone())
                .prop_map(|(binder, body)| format!("\\{}. {}", binder, body)),
            inner.clone().prop_map(|expr| format!("({})", expr)),
            (inner.clone(), inner).prop_map(|(left, right)| format!("{} {}", left, right)),
        ]
    })
}
