//! Tag Processor: feature-level tag scanning and project-default
//! merging.
//!
//! Deliberately separate from any tag-expression filtering concern (the
//! teacher's boolean `@tag and @other` evaluator) — this component only
//! extracts the handful of prefix tags CRIF cares about.

use crate::model::{CrifFeature, ProjectMetadata};

const NAMESPACE_PREFIX: &str = "@namespace:";
const BASECLASS_PREFIX: &str = "@baseclass:";
const USING_PREFIX: &str = "@using:";

/// Apply feature-level tags to `feature`, then fill in any still-empty
/// `namespace`/`baseClass` from `project_metadata`.
///
/// Feature tags always win: project defaults only apply to fields the tags
/// left untouched.
pub fn apply_feature_tags(
    feature: &mut CrifFeature,
    tags: &[String],
    project_metadata: &ProjectMetadata,
) {
    for tag in tags {
        if let Some(ns) = tag.strip_prefix(NAMESPACE_PREFIX) {
            feature.namespace = ns.to_string();
        } else if let Some(name) = tag.strip_prefix(BASECLASS_PREFIX) {
            apply_baseclass_tag(feature, name);
        } else if let Some(ns) = tag.strip_prefix(USING_PREFIX) {
            feature.usings.insert(ns.to_string());
        }
        // Unrecognized tags are ignored by the core.
    }

    merge_project_defaults(feature, project_metadata);
}

fn apply_baseclass_tag(feature: &mut CrifFeature, name: &str) {
    if let Some(dot) = name.rfind('.') {
        let prefix = name.get(..dot).unwrap_or_default();
        let suffix = name.get(dot + 1..).unwrap_or_default();
        feature.usings.insert(prefix.to_string());
        feature.base_class = suffix.to_string();
    } else {
        feature.base_class = name.to_string();
    }
}

fn merge_project_defaults(feature: &mut CrifFeature, project_metadata: &ProjectMetadata) {
    if feature.namespace.is_empty() {
        if let Some(ns) = &project_metadata.generated_namespace {
            feature.namespace = ns.clone();
        }
    }
    if feature.base_class.is_empty() {
        if let Some(base) = &project_metadata.default_test_base {
            feature.base_class = base.simple_name.clone();
            feature.usings.insert(base.namespace.clone());
        }
    }
}
