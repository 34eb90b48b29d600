//! Step Catalog: an immutable, insertion-order-stable lookup over
//! `StepDefinition`s.

use gherkin_crif_patterns::{compile_pattern, NormalizedKind};

use crate::model::StepDefinition;

/// Collection of step definitions plus a deterministic lookup.
///
/// Immutable after construction: a catalog shared across concurrent
/// invocations must never be mutated by any of them.
#[derive(Debug, Clone, Default)]
pub struct StepCatalog {
    definitions: Vec<StepDefinition>,
}

impl StepCatalog {
    #[must_use]
    pub fn new(definitions: Vec<StepDefinition>) -> Self {
        Self { definitions }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve `(kind, text)` against the catalog following the
    /// deterministic tie-break:
    ///
    /// 1. Filter to definitions whose kind matches.
    /// 2. Among zero-parameter candidates, the first whose pattern equals
    ///    `text` case-insensitively.
    /// 3. Otherwise, among parametric candidates, the first whose compiled
    ///    matcher accepts `text`.
    /// 4. Otherwise, `None`.
    #[must_use]
    pub fn find(&self, kind: NormalizedKind, text: &str) -> Option<&StepDefinition> {
        let candidates = self.definitions.iter().filter(|def| def.kind() == kind);

        let zero_param_hit = candidates
            .clone()
            .find(|def| def.non_table_params().is_empty() && def.pattern.eq_ignore_ascii_case(text));
        if zero_param_hit.is_some() {
            return zero_param_hit;
        }

        candidates
            .filter(|def| !def.non_table_params().is_empty())
            .find(|def| {
                compile_pattern(&def.pattern).is_ok_and(|regex| regex.is_match(text))
            })
    }
}
