use gherkin_crif_patterns::{
    DisplayKeyword, KeywordNormalizer, NormalizedKind, PatternError, build_regex_from_pattern,
    compile_pattern, extract_captured_values,
};

#[test]
fn compiles_and_matches_quoted_and_bare_arguments() {
    let regex = compile_pattern("I have an account named {account}")
        .unwrap_or_else(|e| panic!("pattern should compile: {e}"));
    let captures = extract_captured_values(&regex, r#"I have an account named "Ski Village""#)
        .unwrap_or_else(|| panic!("expected a match"));
    assert_eq!(captures, vec![r#""Ski Village""#.to_string()]);
}

#[test]
fn malformed_pattern_fails_to_compile() {
    assert!(compile_pattern("broken {").is_err());
}

#[test]
fn exposes_placeholder_error_details() {
    let Err(err) = build_regex_from_pattern("{open") else {
        panic!("expected placeholder error");
    };
    match err {
        PatternError::Placeholder(info) => assert!(info.to_string().contains("missing closing")),
        PatternError::Regex(other) => panic!("expected placeholder error, got regex error {other}"),
    }
}

#[test]
fn normalizer_resolves_and_but_against_prior_primary_keyword() {
    let mut normalizer = KeywordNormalizer::new();
    assert_eq!(normalizer.resolve(DisplayKeyword::Given), NormalizedKind::Given);
    assert_eq!(normalizer.resolve(DisplayKeyword::And), NormalizedKind::Given);
    assert_eq!(normalizer.resolve(DisplayKeyword::When), NormalizedKind::When);
    assert_eq!(normalizer.resolve(DisplayKeyword::But), NormalizedKind::When);
}

#[test]
fn normalization_law_holds_regardless_of_conjunction_spelling() {
    // Replacing And/But with the current context kind and re-resolving must
    // yield the same normalized kind.
    let mut first = KeywordNormalizer::new();
    let a = first.resolve(DisplayKeyword::When);
    let b = first.resolve(DisplayKeyword::And);

    let mut second = KeywordNormalizer::new();
    let c = second.resolve(DisplayKeyword::When);
    let d = second.resolve(DisplayKeyword::When);

    assert_eq!(a, c);
    assert_eq!(b, d);
}
