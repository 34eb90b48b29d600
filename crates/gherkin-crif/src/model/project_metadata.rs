//! `ProjectMetadata`: project-level defaults supplied once per build.

use serde::{Deserialize, Serialize};

/// A reference to the host project's designated base class for generated
/// tests, discovered by static analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestBaseRef {
    pub simple_name: String,
    pub namespace: String,
    pub full_name: String,
}

/// Project-level defaults, provided once per build.
///
/// # Invariant
/// If `default_test_base` is present, its `namespace` is non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub generated_namespace: Option<String>,
    pub default_test_base: Option<TestBaseRef>,
}

impl ProjectMetadata {
    /// Validate the invariant on `default_test_base`.
    ///
    /// # Errors
    /// Returns a description of the violation when `default_test_base` is
    /// present but its namespace is empty.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(base) = &self.default_test_base {
            if base.namespace.is_empty() {
                return Err(
                    "ProjectMetadata.default_test_base.namespace must be non-empty".to_string(),
                );
            }
        }
        Ok(())
    }
}
