//! Convert lexed pattern tokens into an anchored, case-insensitive capture
//! regular expression.
//!
//! Each placeholder becomes a two-branch capture group: either a
//! double-quoted phrase (which may itself contain spaces) or a run of
//! non-whitespace. This is the minimum expressiveness needed to support both
//! quoted and bare arguments without forcing every author to quote every
//! parameter.

use std::collections::HashSet;

use crate::errors::{PatternError, placeholder_error};

use super::lexer::{Token, lex_pattern};

/// Alternative branches for a captured placeholder: a quoted phrase, or a
/// run of non-whitespace.
const CAPTURE_GROUP: &str = r#"("[^"]*"|\S+)"#;

/// Build an anchored, case-insensitive regular expression source from a step
/// pattern containing `{name}` placeholders.
///
/// # Errors
/// Returns [`PatternError`] when the pattern is malformed (unbalanced or
/// nested braces, empty or duplicate placeholder names). Callers treat this
/// as a fail-closed "no match", not a feature-wide error.
pub fn build_regex_from_pattern(pattern: &str) -> Result<String, PatternError> {
    let tokens = lex_pattern(pattern)?;
    reject_duplicate_placeholders(&tokens)?;

    let mut regex = String::with_capacity(pattern.len().saturating_mul(2) + 2);
    regex.push_str("(?i)^");
    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(&text)),
            Token::Placeholder { .. } => regex.push_str(CAPTURE_GROUP),
        }
    }
    regex.push('$');
    Ok(regex)
}

fn reject_duplicate_placeholders(tokens: &[Token]) -> Result<(), PatternError> {
    let mut seen = HashSet::new();
    for token in tokens {
        if let Token::Placeholder { name } = token {
            if !seen.insert(name.clone()) {
                return Err(placeholder_error(
                    "duplicate placeholder name in step pattern",
                    0,
                    Some(name.clone()),
                ));
            }
        }
    }
    Ok(())
}

/// Compile a step pattern directly into a [`regex::Regex`].
///
/// # Errors
/// Returns [`PatternError`] if pattern translation or regex compilation
/// fails.
///
/// # Examples
/// ```
/// use gherkin_crif_patterns::compile_pattern;
/// let regex = compile_pattern("I have {amount} dollars in {account}")
///     .unwrap_or_else(|e| panic!("{e}"));
/// assert!(regex.is_match(r#"I have 50 dollars in "Savings""#));
/// ```
pub fn compile_pattern(pattern: &str) -> Result<regex::Regex, PatternError> {
    let src = build_regex_from_pattern(pattern)?;
    regex::Regex::new(&src).map_err(PatternError::from)
}
