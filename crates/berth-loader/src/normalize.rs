//! Normalization pipeline.
//!
//! Runs paths, naming, dependencies, and service defaults in that order
//! against one project. The first failing stage aborts the pass. There is
//! no rollback: a project that failed to normalize must be discarded.

use berth_common::config::NormalizeOptions;
use berth_common::error::Result;

use crate::model::Project;
use crate::{defaults, dependencies, naming, paths};

/// Normalizes `project` in place, optionally rooting build contexts.
///
/// # Errors
///
/// Returns the first error raised by a stage.
pub fn normalize(project: &mut Project, resolve_build_paths: bool) -> Result<()> {
    normalize_with(project, &NormalizeOptions::with_build_paths(resolve_build_paths))
}

/// Normalizes `project` in place with the full option set.
///
/// # Errors
///
/// Returns [`BerthError::PathResolution`](berth_common::error::BerthError::PathResolution)
/// if a path cannot be made absolute, or
/// [`BerthError::NamingConflict`](berth_common::error::BerthError::NamingConflict)
/// in strict naming mode.
pub fn normalize_with(project: &mut Project, options: &NormalizeOptions) -> Result<()> {
    tracing::info!(project = %project.name, ?options, "normalizing project");
    paths::resolve_paths(project, options.resolve_build_paths)?;
    naming::name_resources(project, options)?;
    dependencies::resolve_dependencies(project)?;
    defaults::apply_service_defaults(project);
    tracing::info!(
        project = %project.name,
        services = project.services.len(),
        networks = project.networks.len(),
        volumes = project.volumes.len(),
        "project normalized"
    );
    Ok(())
}
