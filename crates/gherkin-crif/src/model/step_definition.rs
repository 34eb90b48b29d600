//! `StepDefinition`, its parameters, and `ProjectMetadata`.
//!
//! These are the two inputs the host project's static analyzer is
//! responsible for discovering; this crate only consumes them.

use serde::{Deserialize, Serialize};

use gherkin_crif_patterns::NormalizedKind;

/// A single discovered step-definition parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Whether this parameter is the special `DataTable` slot.
    #[must_use]
    pub fn is_data_table(&self) -> bool {
        self.ty.eq_ignore_ascii_case("DataTable")
    }

    /// Whether this parameter's declared type is `string` (case-insensitive),
    /// triggering the quote-wrapping rule during argument extraction.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.ty.eq_ignore_ascii_case("string")
    }
}

/// A step definition discovered by the host project's static analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    pub kind: NormalizedKindDto,
    pub pattern: String,
    pub method_name: String,
    pub owner_class: String,
    pub owner_namespace: String,
    pub params: Vec<Parameter>,
}

impl StepDefinition {
    #[must_use]
    pub fn new(
        kind: NormalizedKind,
        pattern: impl Into<String>,
        method_name: impl Into<String>,
        owner_class: impl Into<String>,
        owner_namespace: impl Into<String>,
        params: Vec<Parameter>,
    ) -> Self {
        Self {
            kind: NormalizedKindDto::from(kind),
            pattern: pattern.into(),
            method_name: method_name.into(),
            owner_class: owner_class.into(),
            owner_namespace: owner_namespace.into(),
            params,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NormalizedKind {
        self.kind.into()
    }

    /// Parameters excluding the trailing `DataTable` slot, if any — these are
    /// the ones that line up with placeholder capture groups.
    #[must_use]
    pub fn non_table_params(&self) -> Vec<&Parameter> {
        self.params.iter().filter(|p| !p.is_data_table()).collect()
    }

    #[must_use]
    pub fn data_table_param(&self) -> Option<&Parameter> {
        self.params.iter().find(|p| p.is_data_table())
    }
}

/// Serializable mirror of [`NormalizedKind`], which does not itself implement
/// `serde` traits (it lives in the pattern-compilation crate, which has no
/// need of serialization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizedKindDto {
    Given,
    When,
    Then,
}

impl From<NormalizedKind> for NormalizedKindDto {
    fn from(kind: NormalizedKind) -> Self {
        match kind {
            NormalizedKind::Given => Self::Given,
            NormalizedKind::When => Self::When,
            NormalizedKind::Then => Self::Then,
        }
    }
}

impl From<NormalizedKindDto> for NormalizedKind {
    fn from(dto: NormalizedKindDto) -> Self {
        match dto {
            NormalizedKindDto::Given => Self::Given,
            NormalizedKindDto::When => Self::When,
            NormalizedKindDto::Then => Self::Then,
        }
    }
}
