//! Reserved identifiers, exposed as overridable configuration.
//!
//! Sensible defaults are pinned below but a host may override them;
//! `CoreConfig` is that seam.

/// Reserved identifiers used while assembling and rendering CRIF.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Namespace added to `usings` whenever data tables or unimplemented
    /// stubs are present.
    pub utility_import: String,
    /// Owner value assigned to unmatched steps.
    pub stub_owner_sentinel: String,
    /// Name of the synthesized rule grouping scenarios with no enclosing
    /// Gherkin rule.
    pub default_rule_name: String,
    /// `explicitReason` assigned when a scenario becomes explicit solely
    /// because it contains an unmatched step.
    pub default_stub_reason: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            utility_import: "Gherkin.Generator.Utils".to_string(),
            stub_owner_sentinel: "this".to_string(),
            default_rule_name: "All scenarios".to_string(),
            default_stub_reason: "steps_in_progress".to_string(),
        }
    }
}
