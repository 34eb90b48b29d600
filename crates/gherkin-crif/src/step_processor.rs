//! Step Processor: binds each step to a catalog entry, or synthesizes
//! an unimplemented stub when nothing matches.

use gherkin_crif_patterns::{
    compile_pattern, extract_captured_values, DisplayKeyword, KeywordNormalizer, NormalizedKind,
};
use tracing::debug;

use crate::catalog::StepCatalog;
use crate::error::CoreError;
use crate::model::{
    mark_last, CrifArgument, CrifDataTable, CrifStep, OrderedSet, Parameter, Step, StepDefinition,
    TypedParam, UnimplementedStep,
};

/// Process one step against `catalog`, updating `classes`/`usings`/
/// `unimplemented` as a side effect.
///
/// `table_counter` is scoped to the containing scenario or background and is
/// shared across every step in that sequence, so data-table variable names
/// come out `table1, table2, …` in document order.
#[expect(
    clippy::too_many_arguments,
    reason = "each argument is a distinct accumulator the caller threads through; bundling them into a context struct would just move the same fields one level down"
)]
pub fn process_step(
    feature_name: &str,
    catalog: &StepCatalog,
    normalizer: &mut KeywordNormalizer,
    step: &Step,
    table_counter: &mut u32,
    classes: &mut OrderedSet,
    usings: &mut OrderedSet,
    unimplemented: &mut Vec<UnimplementedStep>,
) -> Result<CrifStep, CoreError> {
    let display = step
        .display_keyword()
        .map_err(|keyword| CoreError::UnknownKeyword {
            feature: feature_name.to_string(),
            keyword,
        })?;
    let normalized = normalizer.resolve(display);

    let data_table = step
        .data_table
        .as_ref()
        .map(|table| {
            let headers = table.header().to_vec();
            for row in table.body() {
                if row.len() != headers.len() {
                    return Err(CoreError::MalformedDocument {
                        feature: feature_name.to_string(),
                        reason: format!(
                            "data table row has {} cell(s), header has {}",
                            row.len(),
                            headers.len()
                        ),
                    });
                }
            }
            *table_counter += 1;
            Ok(CrifDataTable {
                variable_name: format!("table{table_counter}"),
                headers,
                rows: table.body().to_vec(),
            })
        })
        .transpose()?;

    match catalog.find(normalized, &step.text) {
        Some(def) => Ok(process_matched(display, step, def, data_table, classes, usings)?),
        None => {
            let tokens = tokenize(&step.text);
            Ok(process_unmatched(
                display,
                normalized,
                step,
                &tokens,
                data_table,
                unimplemented,
            ))
        }
    }
}

fn process_matched(
    display: DisplayKeyword,
    step: &Step,
    def: &StepDefinition,
    data_table: Option<CrifDataTable>,
    classes: &mut OrderedSet,
    usings: &mut OrderedSet,
) -> Result<CrifStep, CoreError> {
    classes.insert(def.owner_class.clone());
    usings.insert(def.owner_namespace.clone());

    let mut arguments = extract_matched_arguments(def, &step.text)?;
    if def.data_table_param().is_some() {
        if let Some(table) = &data_table {
            arguments.push(CrifArgument {
                value: table.variable_name.clone(),
                is_last: false,
            });
        }
    }
    mark_last(&mut arguments, |arg, last| arg.is_last = last);

    debug!(owner = %def.owner_class, method = %def.method_name, "step matched catalog entry");

    Ok(CrifStep {
        keyword: display.to_string(),
        text: step.text.clone(),
        owner: def.owner_class.clone(),
        method: def.method_name.clone(),
        arguments,
        data_table,
    })
}

fn extract_matched_arguments(
    def: &StepDefinition,
    text: &str,
) -> Result<Vec<CrifArgument>, CoreError> {
    let params = def.non_table_params();
    if params.is_empty() {
        return Ok(Vec::new());
    }
    let regex = compile_pattern(&def.pattern)?;
    let raw_values = extract_captured_values(&regex, text).unwrap_or_default();
    Ok(params
        .iter()
        .zip(raw_values.iter())
        .map(|(param, raw)| CrifArgument {
            value: format_matched_argument(param, raw),
            is_last: false,
        })
        .collect())
}

fn format_matched_argument(param: &Parameter, raw: &str) -> String {
    if let Some(name) = strip_outline_placeholder(raw) {
        return name.to_string();
    }
    if param.is_string() && !is_double_quoted(raw) {
        return format!("\"{raw}\"");
    }
    raw.to_string()
}

fn strip_outline_placeholder(raw: &str) -> Option<&str> {
    raw.strip_prefix('<').and_then(|rest| rest.strip_suffix('>'))
}

fn is_double_quoted(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"')
}

fn process_unmatched(
    display: DisplayKeyword,
    normalized: NormalizedKind,
    step: &Step,
    tokens: &[TextToken],
    data_table: Option<CrifDataTable>,
    unimplemented: &mut Vec<UnimplementedStep>,
) -> CrifStep {
    let mut arguments = unmatched_arguments(tokens);
    mark_last(&mut arguments, |arg, last| arg.is_last = last);

    let (pattern_text, mut parameters) = build_stub_pattern(tokens);
    if data_table.is_some() {
        parameters.push(TypedParam::new("DataTable", "table"));
    }
    mark_last(&mut parameters, |param, last| param.is_last = last);
    let method = generated_method_name(&strip_curly_placeholders(&pattern_text));

    record_unimplemented(
        unimplemented,
        normalized,
        pattern_text,
        method.clone(),
        parameters,
    );

    debug!(method = %method, "step fell back to stub synthesis");

    CrifStep {
        keyword: display.to_string(),
        text: step.text.clone(),
        owner: "this".to_string(),
        method,
        arguments,
        data_table,
    }
}

fn unmatched_arguments(tokens: &[TextToken]) -> Vec<CrifArgument> {
    tokens
        .iter()
        .filter_map(|token| {
            let value = match token {
                TextToken::Outline(name) => name.clone(),
                TextToken::Integer(digits) => digits.clone(),
                TextToken::Quoted(phrase) => phrase.clone(),
                TextToken::Literal(_) => return None,
            };
            Some(CrifArgument {
                value,
                is_last: false,
            })
        })
        .collect()
}

fn build_stub_pattern(tokens: &[TextToken]) -> (String, Vec<TypedParam>) {
    let mut pattern = String::new();
    let mut parameters = Vec::new();
    let mut value_n = 0u32;
    let mut string_n = 0u32;

    for token in tokens {
        match token {
            TextToken::Literal(text) => pattern.push_str(text),
            TextToken::Outline(name) => {
                pattern.push('<');
                pattern.push_str(name);
                pattern.push('>');
                parameters.push(TypedParam::new("string", name.clone()));
            }
            TextToken::Integer(digits) => {
                value_n += 1;
                let name = format!("value{value_n}");
                pattern.push('{');
                pattern.push_str(&name);
                pattern.push('}');
                parameters.push(TypedParam::new("int", name));
            }
            TextToken::Quoted(_) => {
                string_n += 1;
                let name = format!("string{string_n}");
                pattern.push('{');
                pattern.push_str(&name);
                pattern.push('}');
                parameters.push(TypedParam::new("string", name));
            }
        }
    }

    (pattern, parameters)
}

fn record_unimplemented(
    unimplemented: &mut Vec<UnimplementedStep>,
    normalized: NormalizedKind,
    text: String,
    method: String,
    parameters: Vec<TypedParam>,
) {
    let normalized_keyword = normalized.to_string();
    let already_present = unimplemented
        .iter()
        .any(|existing| existing.normalized_keyword == normalized_keyword && existing.text == text);
    if already_present {
        return;
    }
    unimplemented.push(UnimplementedStep {
        normalized_keyword,
        text,
        method,
        parameters,
    });
}

/// Split on spaces, hyphens, and underscores; title-case each non-empty
/// token; concatenate; strip non-alphanumeric characters.
#[must_use]
pub fn generated_method_name(text: &str) -> String {
    let mut result = String::new();
    for token in text.split(['-', '_', ' ']) {
        if token.is_empty() {
            continue;
        }
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result.retain(|c| c.is_ascii_alphanumeric());
    result
}

fn strip_curly_placeholders(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0usize;
    let len = text.len();
    while pos < len {
        let Some(ch) = text.get(pos..).and_then(|s| s.chars().next()) else {
            break;
        };
        if ch == '{' {
            if let Some(rel) = text.get(pos + 1..).and_then(|s| s.find('}')) {
                pos = pos + 1 + rel + 1;
                continue;
            }
        }
        out.push(ch);
        pos += ch.len_utf8();
    }
    out
}

/// A lexical piece of raw step text, as scanned left-to-right for stub
/// synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TextToken {
    Literal(String),
    /// A scenario-outline placeholder `<name>`, holding just `name`.
    Outline(String),
    /// A bare integer literal (`\b\d+\b`).
    Integer(String),
    /// A double-quoted phrase, including its surrounding quotes.
    Quoted(String),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn slice(text: &str, start: usize, end: usize) -> String {
    text.get(start..end).unwrap_or_default().to_string()
}

fn find_quote_end(text: &str, from: usize) -> Option<usize> {
    text.get(from..)
        .and_then(|s| s.find('"'))
        .map(|rel| from + rel + 1)
}

fn find_outline_end(text: &str, from: usize) -> Option<(String, usize)> {
    let rel = text.get(from..)?.find('>')?;
    let close = from + rel;
    Some((slice(text, from, close), close + 1))
}

fn scan_integer(text: &str, start: usize) -> (String, usize, bool) {
    let mut end = start;
    while let Some(c) = text.get(end..).and_then(|s| s.chars().next()) {
        if c.is_ascii_digit() {
            end += c.len_utf8();
        } else {
            break;
        }
    }
    let next_is_word = text
        .get(end..)
        .and_then(|s| s.chars().next())
        .is_some_and(is_word_char);
    (slice(text, start, end), end, next_is_word)
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<TextToken>) {
    if !literal.is_empty() {
        tokens.push(TextToken::Literal(std::mem::take(literal)));
    }
}

/// Scan `text` left-to-right, identifying scenario-outline placeholders,
/// bare integers, and double-quoted phrases, per the unmatched-branch and
/// stub-parameter-inference rules.
fn tokenize(text: &str) -> Vec<TextToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut pos = 0usize;
    let mut prev_char: Option<char> = None;
    let len = text.len();

    while pos < len {
        let Some(ch) = text.get(pos..).and_then(|s| s.chars().next()) else {
            break;
        };
        let ch_len = ch.len_utf8();

        if ch == '"' {
            if let Some(end) = find_quote_end(text, pos + ch_len) {
                flush_literal(&mut literal, &mut tokens);
                tokens.push(TextToken::Quoted(slice(text, pos, end)));
                pos = end;
                prev_char = Some('"');
                continue;
            }
        } else if ch == '<' {
            if let Some((name, end)) = find_outline_end(text, pos + ch_len) {
                flush_literal(&mut literal, &mut tokens);
                tokens.push(TextToken::Outline(name));
                pos = end;
                prev_char = Some('>');
                continue;
            }
        } else if ch.is_ascii_digit() && !prev_char.is_some_and(is_word_char) {
            let (digits, end, next_is_word) = scan_integer(text, pos);
            pos = end;
            if next_is_word {
                literal.push_str(&digits);
            } else {
                flush_literal(&mut literal, &mut tokens);
                tokens.push(TextToken::Integer(digits));
            }
            prev_char = digits.chars().last();
            continue;
        }

        literal.push(ch);
        prev_char = Some(ch);
        pos += ch_len;
    }
    flush_literal(&mut literal, &mut tokens);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_method_name_splits_titlecases_and_strips_punctuation() {
        assert_eq!(generated_method_name("i have widgets"), "IHaveWidgets");
        assert_eq!(
            generated_method_name("multi-word_example here"),
            "MultiWordExampleHere"
        );
    }

    #[test]
    fn tokenize_finds_integer_and_quoted_phrase_in_order() {
        let tokens = tokenize(r#"I have 12 "shiny" widgets"#);
        assert_eq!(
            tokens,
            vec![
                TextToken::Literal("I have ".to_string()),
                TextToken::Integer("12".to_string()),
                TextToken::Literal(" ".to_string()),
                TextToken::Quoted("\"shiny\"".to_string()),
                TextToken::Literal(" widgets".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_leaves_outline_placeholder_distinct_from_quoted_angle_bracket() {
        let tokens = tokenize("I have <amount> dollars");
        assert_eq!(
            tokens,
            vec![
                TextToken::Literal("I have ".to_string()),
                TextToken::Outline("amount".to_string()),
                TextToken::Literal(" dollars".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_does_not_treat_quoted_angle_bracket_as_outline_placeholder() {
        let tokens = tokenize(r#"I search for "a < b""#);
        assert_eq!(
            tokens,
            vec![
                TextToken::Literal("I search for ".to_string()),
                TextToken::Quoted("\"a < b\"".to_string()),
            ]
        );
    }

    #[test]
    fn build_stub_pattern_numbers_integers_and_strings_independently() {
        let tokens = tokenize(r#"I have 12 "shiny" widgets"#);
        let (pattern, params) = build_stub_pattern(&tokens);
        assert_eq!(pattern, "I have {value1} {string1} widgets");
        assert_eq!(params.len(), 2);
        let first = params
            .first()
            .unwrap_or_else(|| panic!("expected two parameters"));
        let second = params
            .get(1)
            .unwrap_or_else(|| panic!("expected two parameters"));
        assert_eq!(first.ty, "int");
        assert_eq!(first.name, "value1");
        assert_eq!(second.ty, "string");
        assert_eq!(second.name, "string1");
    }

    #[test]
    fn strip_curly_placeholders_removes_whole_token() {
        assert_eq!(
            strip_curly_placeholders("I have {value1} {string1} widgets"),
            "I have  widgets"
        );
    }
}
