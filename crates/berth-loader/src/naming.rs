//! Canonical names for networks and volumes.
//!
//! Precedence, highest first: an external resource keeps the name the
//! loader gave it, a user-supplied name is kept, everything else becomes
//! `<project>_<key>`.

use std::collections::BTreeMap;

use berth_common::config::NormalizeOptions;
use berth_common::constants::{DEFAULT_NETWORK, NAME_SEPARATOR};
use berth_common::error::{BerthError, Result};

use crate::model::{NamedResource, NetworkConfig, Project};

/// Injects the default network and names every network and volume.
///
/// # Errors
///
/// Returns [`BerthError::NamingConflict`] when `options.strict_names` is set
/// and two resources of the same kind share a canonical name.
pub fn name_resources(project: &mut Project, options: &NormalizeOptions) -> Result<()> {
    tracing::info!(project = %project.name, "naming project resources");
    ensure_default_network(project);
    assign_names(&project.name, &mut project.networks);
    assign_names(&project.name, &mut project.volumes);
    check_conflicts(&project.networks, options.strict_names)?;
    check_conflicts(&project.volumes, options.strict_names)?;
    Ok(())
}

/// Adds an unnamed, managed `default` network if none is declared.
pub fn ensure_default_network(project: &mut Project) {
    if !project.networks.contains_key(DEFAULT_NETWORK) {
        tracing::debug!("adding implicit default network");
        let _ = project
            .networks
            .insert(DEFAULT_NETWORK.to_string(), NetworkConfig::default());
    }
}

/// Generated name of a managed resource without an explicit name.
#[must_use]
pub fn canonical_name(project_name: &str, key: &str) -> String {
    format!("{project_name}{NAME_SEPARATOR}{key}")
}

fn assign_names<R: NamedResource>(project_name: &str, resources: &mut BTreeMap<String, R>) {
    for (key, resource) in resources.iter_mut() {
        if !resource.name().is_empty() {
            continue;
        }
        if resource.is_external() {
            tracing::warn!(
                kind = R::KIND,
                key = %key,
                "external resource has no name, using its key"
            );
            resource.set_name(key.clone());
        } else {
            let name = canonical_name(project_name, key);
            tracing::debug!(kind = R::KIND, key = %key, name = %name, "generated name");
            resource.set_name(name);
        }
    }
}

/// Reports canonical names shared by distinct keys when at least one of them is managed.
///
/// Several keys pointing at the same external resource are legitimate and
/// are not reported.
fn check_conflicts<R: NamedResource>(resources: &BTreeMap<String, R>, strict: bool) -> Result<()> {
    let mut by_name: BTreeMap<&str, Vec<(&str, bool)>> = BTreeMap::new();
    for (key, resource) in resources {
        by_name
            .entry(resource.name())
            .or_default()
            .push((key.as_str(), resource.is_external()));
    }

    for (name, owners) in by_name {
        if owners.len() < 2 || owners.iter().all(|(_, external)| *external) {
            continue;
        }
        let keys: Vec<String> = owners.iter().map(|(key, _)| (*key).to_string()).collect();
        if strict {
            return Err(BerthError::NamingConflict {
                kind: R::KIND,
                name: name.to_string(),
                keys,
            });
        }
        tracing::warn!(kind = R::KIND, name, ?keys, "resources share a canonical name");
    }
    Ok(())
}
