//! Unified error type returned by [`crate::generate`].
//!
//! Scenario-scoped failures (malformed Examples) are recoverable locally
//! without failing the rest of the feature; anything that fails the whole
//! feature is one of these variants.

use thiserror::Error;

use gherkin_crif_patterns::PatternError;

/// Errors that can abort a whole-feature generation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input `GherkinDoc` is missing a required field or otherwise
    /// malformed.
    #[error("malformed Gherkin document for feature `{feature}`: {reason}")]
    MalformedDocument { feature: String, reason: String },

    /// A step's raw keyword did not match one of the five recognised
    /// spellings.
    #[error("unknown step keyword `{keyword}` in feature `{feature}`")]
    UnknownKeyword { feature: String, keyword: String },

    /// An Examples table's header and a data row disagree on width.
    /// Scenario-scoped: other scenarios in the same feature still generate.
    #[error("inconsistent Examples table in scenario `{scenario}` of feature `{feature}`: {reason}")]
    InconsistentExamples {
        feature: String,
        scenario: String,
        reason: String,
    },

    /// `ProjectMetadata` failed its own invariant check.
    #[error("invalid project metadata: {0}")]
    InvalidProjectMetadata(String),

    /// The invocation was abandoned in response to a cancellation request.
    /// No partial output accompanies this variant.
    #[error("generation cancelled for feature `{feature}`")]
    Cancelled { feature: String },

    /// The template engine failed to render the assembled CRIF.
    #[error("template rendering failed for feature `{feature}`: {source}")]
    Render {
        feature: String,
        #[source]
        source: handlebars::RenderError,
    },

    /// The JSON auxiliary artifact failed to serialize.
    #[error("failed to serialize CRIF to JSON for feature `{feature}`: {source}")]
    Json {
        feature: String,
        #[source]
        source: serde_json::Error,
    },

    /// A step pattern failed to compile. Pattern compilation failure is
    /// fail-closed at the step level (the step is simply treated as
    /// unmatched); this variant exists for callers that want compile-time
    /// catalog validation ahead of generation rather than silent per-step
    /// fallback.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl CoreError {
    /// The feature name this error is attributed to, when it has one.
    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::MalformedDocument { feature, .. }
            | Self::UnknownKeyword { feature, .. }
            | Self::InconsistentExamples { feature, .. }
            | Self::Cancelled { feature }
            | Self::Render { feature, .. }
            | Self::Json { feature, .. } => Some(feature),
            Self::InvalidProjectMetadata(_) | Self::Pattern(_) => None,
        }
    }
}
