//! Template Renderer: a pure function of a template string and a
//! `CrifFeature`, plus the JSON auxiliary artifact.

use handlebars::Handlebars;
use serde_json::Value;
use tracing::error;

use crate::error::CoreError;
use crate::model::CrifFeature;

/// Render `template` against `feature` using Mustache-family, case-insensitive
/// key lookup. No I/O: the caller owns reading the template and
/// writing the output.
///
/// # Errors
/// Returns [`CoreError::Render`] if the template fails to compile or render.
pub fn render(feature: &CrifFeature, template: &str) -> Result<String, CoreError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(false);
    configure_case_insensitive_lookup(&mut registry);

    registry
        .render_template(template, &crif_to_value(feature))
        .map_err(|source| {
            let err = CoreError::Render {
                feature: feature.feature_name.clone(),
                source,
            };
            error!(feature = %feature.feature_name, error = %err, "template render failed");
            err
        })
}

/// Serialize `feature`'s CRIF as pretty-printed JSON, suitable for emission
/// alongside the generated source as a debug artifact.
///
/// # Errors
/// Returns [`CoreError::Json`] if serialization fails (unexpected: CRIF has
/// no non-serializable fields, but `serde_json` is still fallible in
/// principle, e.g. on interior `NaN` floats — which CRIF does not contain).
pub fn render_json(feature: &CrifFeature) -> Result<String, CoreError> {
    serde_json::to_string_pretty(feature).map_err(|source| {
        let err = CoreError::Json {
            feature: feature.feature_name.clone(),
            source,
        };
        error!(feature = %feature.feature_name, error = %err, "JSON artifact serialization failed");
        err
    })
}

/// Handlebars looks up keys case-sensitively by default; templates need
/// case-insensitive lookup, so every CRIF field name is mirrored under its
/// lowercase spelling in the rendering context.
fn crif_to_value(feature: &CrifFeature) -> Value {
    let value = serde_json::to_value(feature).unwrap_or(Value::Null);
    lowercase_keys(value)
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, inner) in map {
                let lowered = lowercase_keys(inner);
                out.insert(key.to_ascii_lowercase(), lowered.clone());
                out.insert(key, lowered);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

fn configure_case_insensitive_lookup(registry: &mut Handlebars) {
    // Key casing is handled by mirroring keys in `crif_to_value` rather than
    // a custom helper, since Handlebars' path resolution does not expose a
    // case-folding hook.
    let _ = registry;
}
