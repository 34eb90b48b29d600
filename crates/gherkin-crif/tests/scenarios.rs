//! Integration coverage for the lettered scenarios and universal invariants
//! from the pipeline's specification: one test per scenario (A-G), plus the
//! cross-cutting invariants that must hold for any CRIF the assembler
//! produces.

use gherkin_crif::model::{
    Background, ExampleTable, Feature, FeatureChild, GherkinDoc, GherkinTable, Parameter,
    ProjectMetadata, Rule, Scenario, Step, StepDefinition,
};
use gherkin_crif::{assemble, CancellationToken, CoreConfig, CoreError, StepCatalog};
use gherkin_crif_patterns::NormalizedKind;

fn init_tracing() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("gherkin_crif=debug")
            .try_init();
    });
}

fn step(keyword: &str, text: &str) -> Step {
    Step {
        keyword: keyword.to_string(),
        text: text.to_string(),
        data_table: None,
    }
}

fn doc(feature: Feature) -> GherkinDoc {
    GherkinDoc {
        file_name: "sample".to_string(),
        feature,
    }
}

fn single_scenario_feature(name: &str, scenario: Scenario) -> Feature {
    Feature {
        name: name.to_string(),
        description: Vec::new(),
        tags: Vec::new(),
        background: None,
        children: vec![FeatureChild::Scenario(scenario)],
    }
}

fn scenario_named(name: &str, steps: Vec<Step>) -> Scenario {
    Scenario {
        name: name.to_string(),
        description: None,
        tags: Vec::new(),
        steps,
        examples: None,
    }
}

/// Scenario A - simple match, quoted string parameter.
#[test]
fn scenario_a_simple_match_with_quoted_string_parameter() {
    init_tracing();
    let catalog = StepCatalog::new(vec![StepDefinition::new(
        NormalizedKind::Given,
        "I have an account named {account}",
        "IHaveAnAccountNamed",
        "AccountSteps",
        "N.Steps",
        vec![Parameter::new("account", "string")],
    )]);
    let document = doc(single_scenario_feature(
        "X",
        scenario_named(
            "X",
            vec![step("Given", r#"I have an account named "Ski Village""#)],
        ),
    ));

    let output = assemble(
        &document,
        &catalog,
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let crif_step = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .and_then(|scenario| scenario.steps.first())
        .unwrap_or_else(|| panic!("expected one step"));

    assert_eq!(crif_step.owner, "AccountSteps");
    assert_eq!(crif_step.method, "IHaveAnAccountNamed");
    assert_eq!(crif_step.arguments.len(), 1);
    let argument = crif_step
        .arguments
        .first()
        .unwrap_or_else(|| panic!("expected one argument"));
    assert_eq!(argument.value, "\"Ski Village\"");
    assert!(argument.is_last);
    assert!(output.feature.usings.contains("N.Steps"));
}

/// Scenario B - And normalization and multi-class feature.
#[test]
fn scenario_b_and_normalization_across_two_classes() {
    init_tracing();
    let catalog = StepCatalog::new(vec![
        StepDefinition::new(
            NormalizedKind::Given,
            "I am logged in",
            "LoggedIn",
            "LoginSteps",
            "A",
            Vec::new(),
        ),
        StepDefinition::new(
            NormalizedKind::Given,
            "I have a workspace",
            "HaveWorkspace",
            "WorkspaceSteps",
            "B",
            Vec::new(),
        ),
    ]);
    let document = doc(single_scenario_feature(
        "S",
        scenario_named(
            "S",
            vec![
                step("Given", "I am logged in"),
                step("And", "I have a workspace"),
            ],
        ),
    ));

    let output = assemble(
        &document,
        &catalog,
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    assert_eq!(scenario.steps.len(), 2);
    assert!(output.feature.usings.contains("A"));
    assert!(output.feature.usings.contains("B"));
    assert!(output.feature.classes.contains("LoginSteps"));
    assert!(output.feature.classes.contains("WorkspaceSteps"));
    let second_step = scenario
        .steps
        .get(1)
        .unwrap_or_else(|| panic!("expected a second step"));
    assert_eq!(second_step.keyword, "And");
    assert_eq!(second_step.owner, "WorkspaceSteps");
}

/// Scenario C - unmatched step with integer and quoted string, no data table.
#[test]
fn scenario_c_unmatched_step_synthesizes_stub_with_inferred_parameters() {
    init_tracing();
    let document = doc(single_scenario_feature(
        "S",
        scenario_named("S", vec![step("When", r#"I have 12 "shiny" widgets"#)]),
    ));

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let stub = output
        .feature
        .unimplemented
        .first()
        .unwrap_or_else(|| panic!("expected one unimplemented stub"));
    assert_eq!(stub.text, "I have {value1} {string1} widgets");
    assert_eq!(stub.method, "IHaveWidgets");
    assert_eq!(stub.parameters.len(), 2);
    let first_param = stub
        .parameters
        .first()
        .unwrap_or_else(|| panic!("expected two stub parameters"));
    let second_param = stub
        .parameters
        .get(1)
        .unwrap_or_else(|| panic!("expected two stub parameters"));
    assert_eq!(first_param.ty, "int");
    assert_eq!(first_param.name, "value1");
    assert_eq!(second_param.ty, "string");
    assert_eq!(second_param.name, "string1");
    assert!(second_param.is_last);

    let scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    let crif_step = scenario
        .steps
        .first()
        .unwrap_or_else(|| panic!("expected one step"));
    assert_eq!(crif_step.arguments.len(), 2);
    let first_argument = crif_step
        .arguments
        .first()
        .unwrap_or_else(|| panic!("expected two arguments"));
    let second_argument = crif_step
        .arguments
        .get(1)
        .unwrap_or_else(|| panic!("expected two arguments"));
    assert_eq!(first_argument.value, "12");
    assert_eq!(second_argument.value, "\"shiny\"");
    assert!(second_argument.is_last);
    assert!(scenario.is_explicit);
    assert_eq!(
        scenario.explicit_reason.as_deref(),
        Some("steps_in_progress")
    );
}

/// Scenario D - unmatched step in a scenario already tagged `@explicit`.
#[test]
fn scenario_d_existing_explicit_tag_reason_is_preserved() {
    init_tracing();
    let mut scenario = scenario_named("S", vec![step("When", r#"I have 12 "shiny" widgets"#)]);
    scenario.tags = vec!["@explicit".to_string()];
    let document = doc(single_scenario_feature("S", scenario));

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let crif_scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    assert!(crif_scenario.is_explicit);
    assert_eq!(crif_scenario.explicit_reason, None);
}

/// Scenario E - data table in background.
#[test]
fn scenario_e_background_data_table_is_numbered_and_imports_utility() {
    init_tracing();
    let table = GherkinTable {
        rows: vec![
            vec!["name".to_string(), "role".to_string()],
            vec!["Ada".to_string(), "admin".to_string()],
            vec!["Grace".to_string(), "user".to_string()],
        ],
    };
    let mut background_step = step("Given", "I have the following users");
    background_step.data_table = Some(table);

    let catalog = StepCatalog::new(vec![StepDefinition::new(
        NormalizedKind::Given,
        "I have the following users",
        "HaveUsers",
        "UserSteps",
        "Feature.Steps",
        vec![Parameter::new("users", "DataTable")],
    )]);

    let document = doc(Feature {
        name: "S".to_string(),
        description: Vec::new(),
        tags: Vec::new(),
        background: Some(Background {
            steps: vec![background_step],
        }),
        children: Vec::new(),
    });

    let output = assemble(
        &document,
        &catalog,
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let background = output
        .feature
        .background
        .as_ref()
        .unwrap_or_else(|| panic!("expected a background"));
    let crif_step = background
        .steps
        .first()
        .unwrap_or_else(|| panic!("expected one background step"));
    let table = crif_step
        .data_table
        .as_ref()
        .unwrap_or_else(|| panic!("expected a data table"));
    assert_eq!(table.variable_name, "table1");
    assert_eq!(crif_step.arguments.len(), 1);
    let argument = crif_step
        .arguments
        .first()
        .unwrap_or_else(|| panic!("expected one argument"));
    assert_eq!(argument.value, "table1");
    assert!(argument.is_last);
    assert!(output.feature.usings.contains("Feature.Steps"));
    assert!(output.feature.usings.contains("Gherkin.Generator.Utils"));
}

/// Scenario F - Scenario Outline with matched parametric step.
#[test]
fn scenario_f_outline_parameters_stay_bare_for_matched_steps() {
    init_tracing();
    let catalog = StepCatalog::new(vec![StepDefinition::new(
        NormalizedKind::Given,
        "I have {amount} dollars",
        "IHaveDollars",
        "MoneySteps",
        "N",
        vec![Parameter::new("amount", "int")],
    )]);
    let scenario = Scenario {
        name: "Outline".to_string(),
        description: None,
        tags: Vec::new(),
        steps: vec![step("Given", "I have <amount> dollars")],
        examples: Some(ExampleTable {
            header: vec!["amount".to_string()],
            rows: vec![vec!["100".to_string()], vec!["200".to_string()]],
        }),
    };
    let document = doc(single_scenario_feature("Outline", scenario));

    let output = assemble(
        &document,
        &catalog,
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let crif_scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    assert_eq!(crif_scenario.parameters.len(), 1);
    let parameter = crif_scenario
        .parameters
        .first()
        .unwrap_or_else(|| panic!("expected one parameter"));
    assert_eq!(parameter.name, "amount");
    assert!(parameter.is_last);
    assert_eq!(crif_scenario.test_cases, vec!["\"100\"", "\"200\""]);

    let crif_step = crif_scenario
        .steps
        .first()
        .unwrap_or_else(|| panic!("expected one step"));
    let argument = crif_step
        .arguments
        .first()
        .unwrap_or_else(|| panic!("expected one argument"));
    assert_eq!(argument.value, "amount");
    assert!(argument.is_last);
}

/// Scenario G - unmatched outline step.
#[test]
fn scenario_g_unmatched_outline_step_still_parameterizes_from_examples() {
    init_tracing();
    let scenario = Scenario {
        name: "Outline".to_string(),
        description: None,
        tags: Vec::new(),
        steps: vec![step("Given", "I have <amount> dollars")],
        examples: Some(ExampleTable {
            header: vec!["amount".to_string()],
            rows: vec![vec!["100".to_string()], vec!["200".to_string()]],
        }),
    };
    let document = doc(single_scenario_feature("Outline", scenario));

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let crif_scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    let crif_step = crif_scenario
        .steps
        .first()
        .unwrap_or_else(|| panic!("expected one step"));
    let argument = crif_step
        .arguments
        .first()
        .unwrap_or_else(|| panic!("expected one argument"));
    assert_eq!(argument.value, "amount");
    assert!(argument.is_last);

    let stub = output
        .feature
        .unimplemented
        .first()
        .unwrap_or_else(|| panic!("expected a stub"));
    let stub_param = stub
        .parameters
        .first()
        .unwrap_or_else(|| panic!("expected one stub parameter"));
    assert_eq!(stub_param.ty, "string");
    assert_eq!(stub_param.name, "amount");
    assert!(stub_param.is_last);
    assert!(crif_scenario.is_explicit);
    assert_eq!(
        crif_scenario.explicit_reason.as_deref(),
        Some("steps_in_progress")
    );
    assert_eq!(crif_scenario.test_cases, vec!["\"100\"", "\"200\""]);
}

/// Universal invariant: a feature with zero scenarios still produces a
/// default rule containing no scenarios.
#[test]
fn feature_with_zero_scenarios_has_no_default_rule() {
    init_tracing();
    let document = doc(Feature {
        name: "Empty".to_string(),
        description: Vec::new(),
        tags: Vec::new(),
        background: None,
        children: Vec::new(),
    });

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    assert!(output.feature.rules.is_empty());
}

/// Universal invariant: a scenario with zero steps has no effect on
/// `usings`/`classes`.
#[test]
fn scenario_with_zero_steps_does_not_populate_usings_or_classes() {
    init_tracing();
    let document = doc(single_scenario_feature("S", scenario_named("S", Vec::new())));

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    assert!(output.feature.usings.is_empty());
    assert!(output.feature.classes.is_empty());
    let scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    assert!(scenario.steps.is_empty());
}

/// Boundary behaviour: a quoted phrase containing `<` is emitted as a
/// string argument, not mistaken for an outline placeholder.
#[test]
fn quoted_phrase_containing_angle_bracket_is_not_an_outline_placeholder() {
    init_tracing();
    let document = doc(single_scenario_feature(
        "S",
        scenario_named("S", vec![step("When", r#"I search for "a < b""#)]),
    ));

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    let scenario = output
        .feature
        .rules
        .first()
        .and_then(|rule| rule.scenarios.first())
        .unwrap_or_else(|| panic!("expected one scenario"));
    let crif_step = scenario
        .steps
        .first()
        .unwrap_or_else(|| panic!("expected one step"));
    assert_eq!(crif_step.arguments.len(), 1);
    let argument = crif_step
        .arguments
        .first()
        .unwrap_or_else(|| panic!("expected one argument"));
    assert_eq!(argument.value, "\"a < b\"");
}

/// Universal invariant: scenarios nested in a Rule preserve document order
/// and do not get folded into the synthesized default rule.
#[test]
fn scenarios_in_a_rule_are_kept_separate_from_default_rule() {
    init_tracing();
    let document = doc(Feature {
        name: "S".to_string(),
        description: Vec::new(),
        tags: Vec::new(),
        background: None,
        children: vec![
            FeatureChild::Scenario(scenario_named("Loose", Vec::new())),
            FeatureChild::Rule(Rule {
                name: "Billing".to_string(),
                description: None,
                scenarios: vec![scenario_named("Inside rule", Vec::new())],
            }),
        ],
    });

    let output = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &CancellationToken::default(),
    )
    .unwrap_or_else(|err| panic!("assemble failed: {err}"));

    assert_eq!(output.feature.rules.len(), 2);
    let default_rule = output
        .feature
        .rules
        .first()
        .unwrap_or_else(|| panic!("expected the default rule first"));
    assert_eq!(default_rule.name, "All scenarios");
    assert_eq!(default_rule.scenarios.len(), 1);
    let billing_rule = output
        .feature
        .rules
        .get(1)
        .unwrap_or_else(|| panic!("expected the Billing rule second"));
    assert_eq!(billing_rule.name, "Billing");
    assert_eq!(billing_rule.scenarios.len(), 1);
}

/// Universal invariant: cancellation observed before a scenario boundary
/// aborts the whole invocation with no partial CRIF.
#[test]
fn cancellation_is_observed_before_each_scenario_boundary() {
    init_tracing();
    let document = doc(Feature {
        name: "S".to_string(),
        description: Vec::new(),
        tags: Vec::new(),
        background: None,
        children: vec![
            FeatureChild::Scenario(scenario_named("First", Vec::new())),
            FeatureChild::Scenario(scenario_named("Second", Vec::new())),
        ],
    });

    let source = gherkin_crif::CancellationSource::new();
    source.cancel();

    let result = assemble(
        &document,
        &StepCatalog::new(Vec::new()),
        &ProjectMetadata::default(),
        &CoreConfig::default(),
        &source.token(),
    );
    assert!(matches!(result, Err(CoreError::Cancelled { .. })));
}
