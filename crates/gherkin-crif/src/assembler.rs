//! CRIF Assembler: orchestrates the tag processor, keyword
//! normalizer, and step processor into one `CrifFeature` per Gherkin
//! document.

use gherkin_crif_patterns::KeywordNormalizer;
use tracing::{error, warn};

use crate::cancellation::CancellationToken;
use crate::config::CoreConfig;
use crate::diagnostics::Diagnostic;
use crate::error::CoreError;
use crate::model::{
    mark_last, Background, CrifBackground, CrifFeature, CrifRule, CrifScenario, ExampleTable,
    Feature, FeatureChild, GherkinDoc, OrderedSet, ProjectMetadata, Rule, Scenario, TypedParam,
    UnimplementedStep,
};
use crate::step_processor::process_step;
use crate::tag_processor::apply_feature_tags;
use crate::StepCatalog;

const EXPLICIT_TAG: &str = "@explicit";
const EXPLICIT_REASON_PREFIX: &str = "@explicit:";

/// The assembled CRIF plus any diagnostics the caller should surface.
#[derive(Debug, Clone)]
pub struct AssembleOutput {
    pub feature: CrifFeature,
    pub diagnostics: Vec<Diagnostic>,
}

/// Assemble a [`CrifFeature`] from `doc` against `catalog` and
/// `project_metadata`.
///
/// # Errors
/// Returns [`CoreError::UnknownKeyword`] if any step's raw keyword is
/// unrecognised, [`CoreError::InconsistentExamples`] if a scenario outline's
/// Examples table has a row whose width disagrees with its header, or
/// [`CoreError::Cancelled`] if `cancellation` is observed to have fired
/// before a scenario boundary.
pub fn assemble(
    doc: &GherkinDoc,
    catalog: &StepCatalog,
    project_metadata: &ProjectMetadata,
    config: &CoreConfig,
    cancellation: &CancellationToken,
) -> Result<AssembleOutput, CoreError> {
    let result = assemble_feature(doc, catalog, project_metadata, config, cancellation);
    if let Err(err) = &result {
        error!(feature = %doc.feature.name, error = %err, "assembly failed");
    }
    result
}

fn assemble_feature(
    doc: &GherkinDoc,
    catalog: &StepCatalog,
    project_metadata: &ProjectMetadata,
    config: &CoreConfig,
    cancellation: &CancellationToken,
) -> Result<AssembleOutput, CoreError> {
    let Feature {
        name,
        description,
        tags,
        background,
        children,
    } = &doc.feature;

    let mut crif = CrifFeature::new(doc.file_name.clone(), name.clone());
    crif.description_lines = description.clone();
    apply_feature_tags(&mut crif, tags, project_metadata);

    if let Some(bg) = background {
        crif.background = Some(assemble_background(
            name,
            bg,
            catalog,
            &mut crif.classes,
            &mut crif.usings,
            &mut crif.unimplemented,
        )?);
    }

    let mut diagnostics = Vec::new();
    let mut default_scenarios = Vec::new();
    for child in children {
        match child {
            FeatureChild::Scenario(scenario) => {
                if cancellation.is_cancelled() {
                    return Err(CoreError::Cancelled {
                        feature: name.clone(),
                    });
                }
                if let Some(assembled) = assemble_scenario_recovering(
                    name,
                    scenario,
                    catalog,
                    config,
                    &mut crif.classes,
                    &mut crif.usings,
                    &mut crif.unimplemented,
                    &mut diagnostics,
                )? {
                    default_scenarios.push(assembled);
                }
            }
            FeatureChild::Rule(rule) => {
                crif.rules.push(assemble_rule(
                    name,
                    rule,
                    catalog,
                    config,
                    &mut crif.classes,
                    &mut crif.usings,
                    &mut crif.unimplemented,
                    &mut diagnostics,
                    cancellation,
                )?);
            }
        }
    }
    if !default_scenarios.is_empty() {
        crif.rules.insert(
            0,
            CrifRule {
                name: config.default_rule_name.clone(),
                description: None,
                scenarios: default_scenarios,
            },
        );
    }

    if crif.has_any_data_table() || !crif.unimplemented.is_empty() {
        crif.usings.insert(config.utility_import.clone());
    }

    if !crif.unimplemented.is_empty() {
        warn!(feature = %name, count = crif.unimplemented.len(), "feature has unimplemented steps");
        diagnostics.push(Diagnostic::unimplemented_steps(
            name.clone(),
            crif.unimplemented.len(),
        ));
    }

    Ok(AssembleOutput {
        feature: crif,
        diagnostics,
    })
}

/// Assemble one scenario, recovering locally from
/// [`CoreError::InconsistentExamples`]: the spec treats a malformed
/// Examples table as a scenario-scoped failure, so the offending scenario
/// is dropped and recorded as an error diagnostic while its siblings still
/// generate. Any other error still fails the whole feature.
#[expect(
    clippy::too_many_arguments,
    reason = "each argument is a distinct accumulator the caller threads through; bundling them into a context struct would just move the same fields one level down"
)]
fn assemble_scenario_recovering(
    feature_name: &str,
    scenario: &Scenario,
    catalog: &StepCatalog,
    config: &CoreConfig,
    classes: &mut OrderedSet,
    usings: &mut OrderedSet,
    unimplemented: &mut Vec<UnimplementedStep>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<CrifScenario>, CoreError> {
    match assemble_scenario(
        feature_name,
        scenario,
        catalog,
        config,
        classes,
        usings,
        unimplemented,
    ) {
        Ok(assembled) => Ok(Some(assembled)),
        Err(CoreError::InconsistentExamples {
            feature,
            scenario,
            reason,
        }) => {
            warn!(feature = %feature, scenario = %scenario, reason = %reason, "scenario dropped: inconsistent Examples table");
            diagnostics.push(Diagnostic::error(
                feature.clone(),
                format!("scenario `{scenario}` dropped: inconsistent Examples table ({reason})"),
            ));
            Ok(None)
        }
        Err(other) => Err(other),
    }
}

fn assemble_background(
    feature_name: &str,
    background: &Background,
    catalog: &StepCatalog,
    classes: &mut OrderedSet,
    usings: &mut OrderedSet,
    unimplemented: &mut Vec<UnimplementedStep>,
) -> Result<CrifBackground, CoreError> {
    let mut normalizer = KeywordNormalizer::new();
    let mut table_counter = 0u32;
    let mut steps = Vec::with_capacity(background.steps.len());
    for step in &background.steps {
        steps.push(process_step(
            feature_name,
            catalog,
            &mut normalizer,
            step,
            &mut table_counter,
            classes,
            usings,
            unimplemented,
        )?);
    }
    Ok(CrifBackground { steps })
}

#[expect(
    clippy::too_many_arguments,
    reason = "each argument is a distinct accumulator the caller threads through; bundling them into a context struct would just move the same fields one level down"
)]
fn assemble_rule(
    feature_name: &str,
    rule: &Rule,
    catalog: &StepCatalog,
    config: &CoreConfig,
    classes: &mut OrderedSet,
    usings: &mut OrderedSet,
    unimplemented: &mut Vec<UnimplementedStep>,
    diagnostics: &mut Vec<Diagnostic>,
    cancellation: &CancellationToken,
) -> Result<CrifRule, CoreError> {
    let mut scenarios = Vec::with_capacity(rule.scenarios.len());
    for scenario in &rule.scenarios {
        if cancellation.is_cancelled() {
            return Err(CoreError::Cancelled {
                feature: feature_name.to_string(),
            });
        }
        if let Some(assembled) = assemble_scenario_recovering(
            feature_name,
            scenario,
            catalog,
            config,
            classes,
            usings,
            unimplemented,
            diagnostics,
        )? {
            scenarios.push(assembled);
        }
    }
    Ok(CrifRule {
        name: rule.name.clone(),
        description: rule.description.clone(),
        scenarios,
    })
}

fn assemble_scenario(
    feature_name: &str,
    scenario: &Scenario,
    catalog: &StepCatalog,
    config: &CoreConfig,
    classes: &mut OrderedSet,
    usings: &mut OrderedSet,
    unimplemented: &mut Vec<UnimplementedStep>,
) -> Result<CrifScenario, CoreError> {
    let method = crate::step_processor::generated_method_name(&scenario.name);
    let mut crif_scenario = CrifScenario::new(scenario.name.clone(), method);
    crif_scenario.remarks = scenario.description.clone();

    if let Some(examples) = &scenario.examples {
        assemble_outline(feature_name, scenario, examples, &mut crif_scenario)?;
    }

    let mut normalizer = KeywordNormalizer::new();
    let mut table_counter = 0u32;
    for step in &scenario.steps {
        crif_scenario.steps.push(process_step(
            feature_name,
            catalog,
            &mut normalizer,
            step,
            &mut table_counter,
            classes,
            usings,
            unimplemented,
        )?);
    }
    let has_unmatched_step = crif_scenario
        .steps
        .iter()
        .any(|step| step.owner == config.stub_owner_sentinel);

    apply_explicit_tags(&mut crif_scenario, &scenario.tags, config, has_unmatched_step);

    Ok(crif_scenario)
}

fn assemble_outline(
    feature_name: &str,
    scenario: &Scenario,
    examples: &ExampleTable,
    crif_scenario: &mut CrifScenario,
) -> Result<(), CoreError> {
    let mut parameters: Vec<TypedParam> = examples
        .header
        .iter()
        .map(|name| TypedParam::new("string", name.clone()))
        .collect();
    mark_last(&mut parameters, |param, last| param.is_last = last);
    crif_scenario.parameters = parameters;

    let mut test_cases = Vec::with_capacity(examples.rows.len());
    for row in &examples.rows {
        if row.len() != examples.header.len() {
            return Err(CoreError::InconsistentExamples {
                feature: feature_name.to_string(),
                scenario: scenario.name.clone(),
                reason: format!(
                    "row has {} cell(s), header has {}",
                    row.len(),
                    examples.header.len()
                ),
            });
        }
        test_cases.push(
            row.iter()
                .map(|cell| format!("\"{cell}\""))
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    crif_scenario.test_cases = test_cases;
    Ok(())
}

fn apply_explicit_tags(
    scenario: &mut CrifScenario,
    tags: &[String],
    config: &CoreConfig,
    has_unmatched_step: bool,
) {
    for tag in tags {
        if let Some(reason) = tag.strip_prefix(EXPLICIT_REASON_PREFIX) {
            scenario.mark_explicit(Some(reason.to_string()));
        } else if tag == EXPLICIT_TAG {
            scenario.mark_explicit(None);
        }
    }
    if has_unmatched_step && !scenario.is_explicit {
        scenario.mark_explicit(Some(config.default_stub_reason.clone()));
    }
}
