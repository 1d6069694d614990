//! Default network attachment and implicit `depends_on` synthesis.
//!
//! Implicit entries are only inserted for targets that have no entry yet,
//! so anything the user wrote in `depends_on` survives untouched.

use std::collections::btree_map::Entry;

use berth_common::constants::{CONTAINER_PREFIX, DEFAULT_NETWORK, SERVICE_PREFIX};
use berth_common::error::Result;

use crate::model::{Project, ServiceConfig, ServiceDependency};

/// Attaches services to the default network and adds implicit dependencies.
///
/// Services are visited in load order. The project-level `default` network
/// itself is declared by [`naming`](crate::naming), not here.
///
/// # Errors
///
/// Currently infallible; malformed references are left for validation.
pub fn resolve_dependencies(project: &mut Project) -> Result<()> {
    tracing::info!(services = project.services.len(), "resolving service dependencies");
    for service in &mut project.services {
        attach_default_network(service);
        infer_implicit_dependencies(service);
    }
    Ok(())
}

/// Joins the default network unless the service declares networks or a network mode.
pub fn attach_default_network(service: &mut ServiceConfig) {
    if service.network_mode.is_empty() && service.networks.is_empty() {
        let _ = service.networks.insert(DEFAULT_NETWORK.to_string(), None);
    }
}

/// Derives dependencies from namespace sharing, `volumes_from`, and `links`.
///
/// Sources are applied in a fixed order: `network_mode`, `ipc`, `pid`,
/// `volumes_from`, `links`. The first source to claim a target wins.
pub fn infer_implicit_dependencies(service: &mut ServiceConfig) {
    let mut implicit: Vec<(String, ServiceDependency)> = Vec::new();

    for mode in [&service.network_mode, &service.ipc, &service.pid] {
        if let Some(target) = mode.strip_prefix(SERVICE_PREFIX) {
            implicit.push((target.to_string(), ServiceDependency::started(true)));
        }
    }

    for source in &service.volumes_from {
        if source.starts_with(CONTAINER_PREFIX) {
            continue;
        }
        implicit.push((
            reference_target(source).to_string(),
            ServiceDependency::started(false),
        ));
    }

    for link in &service.links {
        implicit.push((
            reference_target(link).to_string(),
            ServiceDependency::started(true),
        ));
    }

    for (target, dependency) in implicit {
        if let Entry::Vacant(slot) = service.depends_on.entry(target) {
            tracing::debug!(
                service = %service.name,
                target = %slot.key(),
                restart = dependency.restart,
                "inferred implicit dependency"
            );
            let _ = slot.insert(dependency);
        }
    }
}

/// Service part of `<service>[:<suffix>]`.
fn reference_target(reference: &str) -> &str {
    reference
        .split_once(':')
        .map_or(reference, |(target, _)| target)
}
