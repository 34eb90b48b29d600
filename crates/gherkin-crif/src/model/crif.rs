//! The Code-Ready Intermediate Form: the tree-shaped, template-ready
//! record produced by the assembler and consumed by the renderer.
//!
//! Field names here are part of the external interface — the
//! template engine looks them up by name, case-insensitively — so
//! renames here are a breaking change for every template in the wild.

use serde::{Deserialize, Serialize};

use super::ordered_set::OrderedSet;

/// Top-level CRIF for one feature file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifFeature {
    pub usings: OrderedSet,
    pub namespace: String,
    pub file_name: String,
    pub feature_name: String,
    pub description_lines: Vec<String>,
    pub base_class: String,
    pub classes: OrderedSet,
    pub background: Option<CrifBackground>,
    pub rules: Vec<CrifRule>,
    pub unimplemented: Vec<UnimplementedStep>,
}

impl CrifFeature {
    #[must_use]
    pub fn new(file_name: impl Into<String>, feature_name: impl Into<String>) -> Self {
        Self {
            usings: OrderedSet::new(),
            namespace: String::new(),
            file_name: file_name.into(),
            feature_name: feature_name.into(),
            description_lines: Vec::new(),
            base_class: String::new(),
            classes: OrderedSet::new(),
            background: None,
            rules: Vec::new(),
            unimplemented: Vec::new(),
        }
    }

    /// Whether any step anywhere in the feature carries a data table.
    #[must_use]
    pub fn has_any_data_table(&self) -> bool {
        let background_has_table = self
            .background
            .as_ref()
            .is_some_and(|bg| bg.steps.iter().any(|s| s.data_table.is_some()));
        background_has_table
            || self.rules.iter().any(|rule| {
                rule.scenarios
                    .iter()
                    .any(|scenario| scenario.steps.iter().any(|s| s.data_table.is_some()))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifBackground {
    pub steps: Vec<CrifStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifRule {
    pub name: String,
    pub description: Option<String>,
    pub scenarios: Vec<CrifScenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifScenario {
    pub name: String,
    pub method: String,
    pub remarks: Option<String>,
    pub is_explicit: bool,
    pub explicit_reason: Option<String>,
    pub parameters: Vec<TypedParam>,
    pub test_cases: Vec<String>,
    pub steps: Vec<CrifStep>,
}

impl CrifScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            remarks: None,
            is_explicit: false,
            explicit_reason: None,
            parameters: Vec::new(),
            test_cases: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Mark this scenario explicit, honoring the precedence rule: a reason
    /// already set by a tag is never overwritten by stub synthesis.
    pub fn mark_explicit(&mut self, reason: Option<String>) {
        if self.is_explicit && self.explicit_reason.is_some() {
            return;
        }
        self.is_explicit = true;
        if reason.is_some() {
            self.explicit_reason = reason;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifStep {
    /// Display keyword, preserved for emission (`Given`/`When`/`Then`/`And`/`But`).
    pub keyword: String,
    pub text: String,
    pub owner: String,
    pub method: String,
    pub arguments: Vec<CrifArgument>,
    pub data_table: Option<CrifDataTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifArgument {
    pub value: String,
    pub is_last: bool,
}

/// Mark the last element of `items` as last, clearing the flag on everything
/// before it. Used for every `isLast`-flagged list in CRIF: the
/// template engine is logic-less, so this flag stands in for a
/// for-each-with-separator construct.
pub fn mark_last<T>(items: &mut [T], set_last: impl Fn(&mut T, bool)) {
    let len = items.len();
    for (index, item) in items.iter_mut().enumerate() {
        set_last(item, index + 1 == len);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrifDataTable {
    pub variable_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnimplementedStep {
    pub normalized_keyword: String,
    pub text: String,
    pub method: String,
    pub parameters: Vec<TypedParam>,
}

/// A `{type, name}` pair, optionally flagged as the last element of its
/// containing list. Used for both scenario-outline parameters and
/// unimplemented-stub parameters — the two lists share the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedParam {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub is_last: bool,
}

impl TypedParam {
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            is_last: false,
        }
    }
}
