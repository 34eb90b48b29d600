//! Data model: input contract, catalog inputs, and the CRIF
//! output tree.

mod crif;
mod gherkin_doc;
mod ordered_set;
mod project_metadata;
mod step_definition;

pub use crif::{
    mark_last, CrifArgument, CrifBackground, CrifDataTable, CrifFeature, CrifRule, CrifScenario,
    CrifStep, TypedParam, UnimplementedStep,
};
pub use gherkin_doc::{
    Background, ExampleTable, Feature, FeatureChild, GherkinDoc, GherkinTable, Rule, Scenario,
    Step,
};
pub use ordered_set::OrderedSet;
pub use project_metadata::{ProjectMetadata, TestBaseRef};
pub use step_definition::{NormalizedKindDto, Parameter, StepDefinition};
