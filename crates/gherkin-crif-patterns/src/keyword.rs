//! Display keywords, normalized kinds, and the stateful And/But resolver.
//!
//! Gherkin steps carry one of five surface keywords (`Given`, `When`, `Then`,
//! `And`, `But`), but `And`/`But` only have meaning relative to the nearest
//! preceding primary keyword. This module models the two concepts as
//! distinct types rather than collapsing them into one enum: [`DisplayKeyword`]
//! is what gets echoed back into generated source, [`NormalizedKind`] is what
//! the step catalog queries against.

use std::fmt;
use std::str::FromStr;

/// The five-valued keyword as it appears (and is re-emitted) in a feature file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform the action under test.
    When,
    /// Assert the expected outcome.
    Then,
    /// Continues the previous step's contextual kind.
    And,
    /// Continues the previous step's contextual kind, contrastively.
    But,
}

impl DisplayKeyword {
    /// Return the keyword's canonical spelling.
    ///
    /// # Examples
    /// ```
    /// use gherkin_crif_patterns::DisplayKeyword;
    /// assert_eq!(DisplayKeyword::And.as_str(), "And");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for DisplayKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a raw Gherkin keyword does not match one of the five
/// recognised spellings. Step processing treats this as a hard, feature-wide
/// failure: malformed keywords are not something the catalog can
/// silently work around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeywordError(pub String);

impl fmt::Display for UnknownKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown step keyword: {:?}", self.0)
    }
}

impl std::error::Error for UnknownKeywordError {}

impl FromStr for DisplayKeyword {
    type Err = UnknownKeywordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("given") {
            Ok(Self::Given)
        } else if trimmed.eq_ignore_ascii_case("when") {
            Ok(Self::When)
        } else if trimmed.eq_ignore_ascii_case("then") {
            Ok(Self::Then)
        } else if trimmed.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if trimmed.eq_ignore_ascii_case("but") {
            Ok(Self::But)
        } else {
            Err(UnknownKeywordError(trimmed.to_string()))
        }
    }
}

/// The three-valued kind used to query the step catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedKind {
    /// Precondition.
    Given,
    /// Action under test.
    When,
    /// Expected outcome.
    Then,
}

impl NormalizedKind {
    /// Return the kind's canonical spelling, matching [`DisplayKeyword::as_str`]
    /// for the three primary variants.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        }
    }
}

impl fmt::Display for NormalizedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateful walk over a step sequence that resolves `And`/`But` to the
/// current contextual kind.
///
/// A new `KeywordNormalizer` must be created for each independent step
/// sequence — one per scenario, and a separate one for the background — since
/// `current` is seeded to `Given` at the start of each sequence and must not
/// leak across sequences.
///
/// # Examples
/// ```
/// use gherkin_crif_patterns::{DisplayKeyword, KeywordNormalizer, NormalizedKind};
///
/// let mut normalizer = KeywordNormalizer::new();
/// assert_eq!(normalizer.resolve(DisplayKeyword::Given), NormalizedKind::Given);
/// assert_eq!(normalizer.resolve(DisplayKeyword::And), NormalizedKind::Given);
/// assert_eq!(normalizer.resolve(DisplayKeyword::When), NormalizedKind::When);
/// assert_eq!(normalizer.resolve(DisplayKeyword::But), NormalizedKind::When);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeywordNormalizer {
    current: NormalizedKind,
}

impl Default for KeywordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordNormalizer {
    /// Create a normalizer seeded to `Given`, as required at the start of
    /// every scenario and background.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: NormalizedKind::Given,
        }
    }

    /// Resolve `display` against the current contextual kind, updating the
    /// context when `display` is a primary keyword.
    pub fn resolve(&mut self, display: DisplayKeyword) -> NormalizedKind {
        match display {
            DisplayKeyword::Given => {
                self.current = NormalizedKind::Given;
                NormalizedKind::Given
            }
            DisplayKeyword::When => {
                self.current = NormalizedKind::When;
                NormalizedKind::When
            }
            DisplayKeyword::Then => {
                self.current = NormalizedKind::Then;
                NormalizedKind::Then
            }
            DisplayKeyword::And | DisplayKeyword::But => self.current,
        }
    }
}
