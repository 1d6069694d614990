//! Per-service defaults applied once names and dependencies are settled.

use std::collections::BTreeMap;

use berth_common::constants::{PULL_POLICY_IF_NOT_PRESENT, PULL_POLICY_MISSING};

use crate::model::{Project, ServiceConfig};

/// Canonicalizes pull policies and fills unset values from the project environment.
pub fn apply_service_defaults(project: &mut Project) {
    for service in &mut project.services {
        canonicalize_pull_policy(service);
        if let Some(build) = service.build.as_mut() {
            fill_unset(&mut build.args, &project.environment);
        }
        fill_unset(&mut service.environment, &project.environment);
    }
}

fn canonicalize_pull_policy(service: &mut ServiceConfig) {
    if service.pull_policy.as_deref() == Some(PULL_POLICY_IF_NOT_PRESENT) {
        tracing::debug!(service = %service.name, "rewriting deprecated pull policy");
        service.pull_policy = Some(PULL_POLICY_MISSING.to_string());
    }
}

/// Gives every `None` value whose key exists in `lookup` that value.
fn fill_unset(values: &mut BTreeMap<String, Option<String>>, lookup: &BTreeMap<String, String>) {
    for (key, value) in values.iter_mut() {
        if value.is_none() {
            if let Some(found) = lookup.get(key) {
                *value = Some(found.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BuildConfig;

    fn project_with_env() -> Project {
        let mut project = Project::new("demo");
        let _ = project.environment.insert("FOO".into(), "BAR".into());
        project
    }

    #[test]
    fn unset_build_args_are_looked_up() {
        let mut project = project_with_env();
        let mut build = BuildConfig::with_context("./testdata");
        let _ = build.args.insert("FOO".into(), None);
        let _ = build.args.insert("ZOT".into(), None);
        project.services = vec![ServiceConfig {
            build: Some(build),
            ..ServiceConfig::new("foo")
        }];

        apply_service_defaults(&mut project);

        let args = &project.services[0].build.as_ref().expect("build").args;
        assert_eq!(args["FOO"].as_deref(), Some("BAR"));
        assert_eq!(args["ZOT"], None);
    }

    #[test]
    fn set_values_are_not_replaced() {
        let mut project = project_with_env();
        let mut service = ServiceConfig::new("foo");
        let _ = service.environment.insert("FOO".into(), Some("mine".into()));
        project.services = vec![service];

        apply_service_defaults(&mut project);

        assert_eq!(project.services[0].environment["FOO"].as_deref(), Some("mine"));
    }

    #[test]
    fn if_not_present_becomes_missing() {
        let mut project = Project::new("demo");
        project.services = vec![
            ServiceConfig {
                pull_policy: Some(PULL_POLICY_IF_NOT_PRESENT.into()),
                ..ServiceConfig::new("a")
            },
            ServiceConfig {
                pull_policy: Some("always".into()),
                ..ServiceConfig::new("b")
            },
        ];

        apply_service_defaults(&mut project);

        assert_eq!(project.services[0].pull_policy.as_deref(), Some(PULL_POLICY_MISSING));
        assert_eq!(project.services[1].pull_policy.as_deref(), Some("always"));
    }
}
