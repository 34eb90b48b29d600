//! Caller-facing diagnostics surface.
//!
//! Distinct from [`crate::error::CoreError`]: diagnostics accompany a
//! *successful* CRIF (e.g. a warning about unimplemented steps), whereas
//! `CoreError` means generation failed outright.

use serde::{Deserialize, Serialize};

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A single caller-facing diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// The feature file the diagnostic is attributed to, when known.
    pub feature: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn warning(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            feature: Some(feature.into()),
        }
    }

    #[must_use]
    pub fn error(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            feature: Some(feature.into()),
        }
    }

    /// The warning raised when a feature's `unimplemented` list is non-empty.
    #[must_use]
    pub fn unimplemented_steps(feature: impl Into<String>, count: usize) -> Self {
        Self::warning(feature, format!("{count} step(s) have no matching definition"))
    }
}
