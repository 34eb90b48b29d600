//! Pattern lexer: splits a step-definition pattern into literal runs and
//! `{name}` placeholders, never mutating placeholder text once recognised.
//!
//! Locating placeholders before any literal-escaping pass is the invariant
//! that protects placeholder syntax from being mangled by regex-metacharacter
//! escaping: [`Token::Placeholder`] carries the bare name straight
//! through to the compiler, while only [`Token::Literal`] runs are later
//! passed to `regex::escape`.

use crate::errors::PatternError;

use super::placeholder::parse_placeholder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder { name: String },
}

pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut index = 0usize;
    let mut literal = String::new();
    let mut tokens = Vec::new();

    while index < bytes.len() {
        match bytes.get(index) {
            Some(b'{') => {
                flush_literal(&mut literal, &mut tokens);
                let (end, spec) = parse_placeholder(bytes, index)?;
                tokens.push(Token::Placeholder { name: spec.name });
                index = end;
            }
            Some(_) => {
                let ch = next_char(pattern, index);
                literal.push(ch);
                index += ch.len_utf8();
            }
            None => break,
        }
    }

    flush_literal(&mut literal, &mut tokens);
    Ok(tokens)
}

fn next_char(pattern: &str, byte_index: usize) -> char {
    pattern
        .get(byte_index..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or('\u{FFFD}')
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if literal.is_empty() {
        return;
    }
    tokens.push(Token::Literal(std::mem::take(literal)));
}
