//! The input contract: an already-parsed Gherkin document.
//!
//! Parsing the Gherkin surface syntax is explicitly out of scope for this
//! crate — some other component (a `gherkin`-crate-backed parser, an
//! IDE's incremental parser, a hand-rolled one) produces this tree. These
//! types are a plain, serializable view of exactly the fields the core
//! pipeline reads, independent of any particular parser's internal
//! representation.

use serde::{Deserialize, Serialize};

use gherkin_crif_patterns::DisplayKeyword;

/// A parsed Gherkin feature document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GherkinDoc {
    /// The feature file's base name without extension, copied verbatim into
    /// CRIF.
    pub file_name: String,
    pub feature: Feature,
}

/// The `Feature:` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub description: Vec<String>,
    pub tags: Vec<String>,
    pub background: Option<Background>,
    pub children: Vec<FeatureChild>,
}

/// A feature's direct children: either a scenario with no enclosing rule, or
/// a rule grouping scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FeatureChild {
    Scenario(Scenario),
    Rule(Rule),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub description: Option<String>,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub steps: Vec<Step>,
    pub examples: Option<ExampleTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Raw keyword text as written in the feature file (`"Given"`, `"and"`,
    /// …). Converted to a [`DisplayKeyword`] by the step processor;
    /// an unrecognised spelling is a hard error.
    pub keyword: String,
    pub text: String,
    pub data_table: Option<GherkinTable>,
}

impl Step {
    /// Parse this step's raw keyword into a [`DisplayKeyword`].
    ///
    /// # Errors
    /// Returns the raw keyword text when it does not match one of the five
    /// recognised spellings.
    pub fn display_keyword(&self) -> Result<DisplayKeyword, String> {
        self.keyword
            .parse::<DisplayKeyword>()
            .map_err(|_| self.keyword.clone())
    }
}

/// A raw data table attached to a step: rows exactly as written, header
/// included as the first row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GherkinTable {
    pub rows: Vec<Vec<String>>,
}

impl GherkinTable {
    /// The header row.
    #[must_use]
    pub fn header(&self) -> &[String] {
        self.rows.first().map_or(&[], Vec::as_slice)
    }

    /// Data rows, excluding the header.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// A scenario outline's `Examples:` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
