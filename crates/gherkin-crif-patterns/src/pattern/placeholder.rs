//! Placeholder-name parsing used by the lexer.
//!
//! A placeholder is `{` followed by one or more word characters (`[A-Za-z0-9_]`)
//! followed by `}`. There is no type hint and no nesting: a `{` encountered
//! before the closing `}` is a pathological pattern and fails compilation
//!.

use crate::errors::{PatternError, placeholder_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderSpec {
    pub name: String,
}

/// Parse a `{name}` placeholder starting at byte offset `start` (the index of
/// the opening brace). Returns the parsed placeholder and the byte offset
/// just past the closing brace.
pub(crate) fn parse_placeholder(
    bytes: &[u8],
    start: usize,
) -> Result<(usize, PlaceholderSpec), PatternError> {
    let mut index = start + 1;
    let name_start = index;

    while let Some(&b) = bytes.get(index) {
        match b {
            b'}' => break,
            b'{' => {
                return Err(placeholder_error(
                    "nested '{' inside placeholder",
                    index,
                    None,
                ));
            }
            b if is_word_byte(b) => index += 1,
            _ => {
                return Err(placeholder_error(
                    "placeholder name must contain only word characters",
                    index,
                    None,
                ));
            }
        }
    }

    if index == name_start {
        return Err(placeholder_error("placeholder name must not be empty", start, None));
    }

    let Some(&b'}') = bytes.get(index) else {
        return Err(placeholder_error(
            "missing closing '}' for placeholder",
            start,
            None,
        ));
    };

    // `name_start..index` only ever advanced over bytes matched by
    // `is_word_byte`, a subset of ASCII, so the slice boundaries always fall
    // on UTF-8 character boundaries.
    let name = bytes.get(name_start..index).map_or_else(String::new, |slice| {
        String::from_utf8_lossy(slice).into_owned()
    });
    Ok((index + 1, PlaceholderSpec { name }))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
