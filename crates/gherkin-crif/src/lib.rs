//! Compile-time Gherkin-to-CRIF generator.
//!
//! The core pipeline turns a parsed Gherkin document, a catalog of
//! discovered step definitions, and project-level defaults into a fully
//! resolved Code-Ready Intermediate Form (CRIF), then renders that CRIF
//! against a Mustache-family template to produce generated test source text.
//!
//! This crate does not parse Gherkin itself and does not execute tests: it
//! consumes an already-parsed [`model::GherkinDoc`] and a [`StepCatalog`]
//! discovered by the host project's static analysis, and produces generated
//! source text plus diagnostics. No transport, packaging, or CLI/IDE glue
//! lives here — those are host concerns.

mod assembler;
mod cancellation;
mod catalog;
mod config;
mod diagnostics;
mod error;
pub mod model;
mod render;
mod step_processor;
mod tag_processor;

pub use assembler::{assemble, AssembleOutput};
pub use cancellation::{CancellationSource, CancellationToken};
pub use catalog::StepCatalog;
pub use config::CoreConfig;
pub use diagnostics::{Diagnostic, Severity};
pub use error::CoreError;
pub use render::{render, render_json};
pub use step_processor::generated_method_name;

use model::{GherkinDoc, ProjectMetadata};

/// Output of a full `generate()` invocation: the rendered source text, the
/// CRIF's JSON debug artifact, and any diagnostics the host should surface.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    pub source: String,
    pub json: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the whole pipeline: assemble `doc` into a CRIF against `catalog` and
/// `project_metadata`, then render it against `template` and as pretty JSON.
///
/// # Errors
/// Returns any [`CoreError`] raised while assembling or rendering; see
/// [`assemble`], [`render`], and [`render_json`] for the specific variants.
pub fn generate(
    doc: &GherkinDoc,
    catalog: &StepCatalog,
    project_metadata: &ProjectMetadata,
    template: &str,
    config: &CoreConfig,
    cancellation: &CancellationToken,
) -> Result<GenerateOutput, CoreError> {
    let span = tracing::info_span!("generate", feature = %doc.feature.name);
    let _guard = span.enter();

    let AssembleOutput {
        feature,
        diagnostics,
    } = assemble(doc, catalog, project_metadata, config, cancellation)?;
    let source = render(&feature, template)?;
    let json = render_json(&feature)?;

    Ok(GenerateOutput {
        source,
        json,
        diagnostics,
    })
}
