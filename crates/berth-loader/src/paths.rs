//! Rooting of the working directory, compose files, and build contexts.
//!
//! The working directory and compose files are always made absolute
//! against the process's current directory. Build contexts are only
//! rewritten on request, and never when they point at a remote source.

use std::path::{Component, Path, PathBuf};

use berth_common::constants::DEFAULT_DOCKERFILE;
use berth_common::error::{BerthError, Result};

use crate::model::{BuildConfig, Project};

/// Build context prefixes that denote a remote source.
const REMOTE_CONTEXT_PREFIXES: &[&str] = &["git@", "github.com/"];

/// Makes every project path absolute and fills in the default Dockerfile.
///
/// # Errors
///
/// Returns [`BerthError::PathResolution`] if a relative path is found and
/// the current directory cannot be read.
pub fn resolve_paths(project: &mut Project, resolve_build_paths: bool) -> Result<()> {
    tracing::info!(resolve_build_paths, "resolving project paths");

    project.working_dir = absolutize(&project.working_dir)?;
    project.compose_files = project
        .compose_files
        .iter()
        .map(|file| absolutize(file))
        .collect::<Result<Vec<_>>>()?;

    for service in &mut project.services {
        if let Some(build) = service.build.as_mut() {
            resolve_build(build, &project.working_dir, resolve_build_paths);
        }
    }
    Ok(())
}

fn resolve_build(build: &mut BuildConfig, working_dir: &Path, resolve_build_paths: bool) {
    if resolve_build_paths && !build.context.is_empty() && !is_remote_context(&build.context) {
        let rooted = clean(&working_dir.join(&build.context));
        tracing::debug!(from = %build.context, to = %rooted.display(), "rooted build context");
        build.context = rooted.to_string_lossy().into_owned();
    }
    if build.dockerfile.is_empty() && build.dockerfile_inline.is_none() && !build.context.is_empty()
    {
        build.dockerfile = DEFAULT_DOCKERFILE.to_string();
    }
}

/// Returns the absolute, lexically cleaned form of `path`.
///
/// Relative paths are joined onto the current directory. An empty path
/// resolves to the current directory itself.
///
/// # Errors
///
/// Returns [`BerthError::PathResolution`] if the current directory is needed
/// and cannot be read.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir().map_err(|source| BerthError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean(&cwd.join(path)))
}

/// Performs lexical `.` / `..` normalization without touching the filesystem.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut absolute = false;
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => cleaned.push(prefix.as_os_str()),
            Component::RootDir => {
                cleaned.push(Component::RootDir.as_os_str());
                absolute = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() && !absolute {
                    cleaned.push("..");
                }
            }
            Component::Normal(part) => cleaned.push(part),
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Whether a build context refers to a URL or git remote rather than a local directory.
#[must_use]
pub fn is_remote_context(context: &str) -> bool {
    context.contains("://")
        || REMOTE_CONTEXT_PREFIXES
            .iter()
            .any(|prefix| context.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceConfig;

    fn cwd() -> PathBuf {
        std::env::current_dir().expect("current dir")
    }

    fn service_with_build(build: BuildConfig) -> ServiceConfig {
        ServiceConfig {
            build: Some(build),
            ..ServiceConfig::new("app")
        }
    }

    #[test]
    fn clean_removes_current_dir_segments() {
        assert_eq!(clean(Path::new("/srv/./app/")), PathBuf::from("/srv/app"));
    }

    #[test]
    fn clean_resolves_parent_segments() {
        assert_eq!(clean(Path::new("/srv/app/../db")), PathBuf::from("/srv/db"));
    }

    #[test]
    fn clean_does_not_escape_root() {
        assert_eq!(clean(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn clean_keeps_leading_parent_of_relative_path() {
        assert_eq!(clean(Path::new("../shared/./x")), PathBuf::from("../shared/x"));
    }

    #[test]
    fn clean_of_empty_is_current_dir() {
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn absolutize_relative_joins_current_dir() {
        let resolved = absolutize(Path::new("testdata/simple")).expect("resolve");
        assert_eq!(resolved, cwd().join("testdata").join("simple"));
    }

    #[test]
    fn absolutize_empty_is_current_dir() {
        assert_eq!(absolutize(Path::new("")).expect("resolve"), cwd());
    }

    #[test]
    fn absolutize_is_idempotent() {
        let once = absolutize(Path::new("./a/../b")).expect("resolve");
        let twice = absolutize(&once).expect("resolve");
        assert_eq!(once, twice);
    }

    #[test]
    fn remote_contexts_are_recognized() {
        assert!(is_remote_context("https://github.com/acme/app.git#main"));
        assert!(is_remote_context("git://example.com/app.git"));
        assert!(is_remote_context("git@github.com:acme/app.git"));
        assert!(is_remote_context("github.com/acme/app"));
        assert!(!is_remote_context("./app"));
        assert!(!is_remote_context("/srv/app"));
    }

    #[test]
    fn working_dir_and_compose_files_become_absolute() {
        let mut project = Project::new("demo");
        project.working_dir = PathBuf::from("testdata");
        project.compose_files = vec![
            PathBuf::from("testdata/simple/compose.yaml"),
            PathBuf::from("testdata/simple/compose-with-overrides.yaml"),
        ];

        resolve_paths(&mut project, false).expect("resolve");

        let base = cwd().join("testdata");
        assert_eq!(project.working_dir, base);
        assert_eq!(
            project.compose_files,
            vec![
                base.join("simple").join("compose.yaml"),
                base.join("simple").join("compose-with-overrides.yaml"),
            ]
        );
    }

    #[test]
    fn empty_compose_files_stay_empty() {
        let mut project = Project::new("demo");
        resolve_paths(&mut project, false).expect("resolve");
        assert!(project.compose_files.is_empty());
        assert_eq!(project.working_dir, cwd());
    }

    #[test]
    fn build_context_kept_when_not_resolving() {
        let mut project = Project::new("demo");
        project.services = vec![service_with_build(BuildConfig::with_context("./testdata"))];

        resolve_paths(&mut project, false).expect("resolve");

        let build = project.services[0].build.as_ref().expect("build");
        assert_eq!(build.context, "./testdata");
        assert_eq!(build.dockerfile, DEFAULT_DOCKERFILE);
    }

    #[test]
    fn build_context_rooted_at_working_dir_when_resolving() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let mut project = Project::new("demo");
        project.working_dir = dir.path().to_path_buf();
        project.services = vec![service_with_build(BuildConfig {
            dockerfile: "Dockerfile-sample".into(),
            ..BuildConfig::with_context("./testdata")
        })];

        resolve_paths(&mut project, true).expect("resolve");

        let build = project.services[0].build.as_ref().expect("build");
        let expected = clean(&dir.path().join("testdata"));
        assert_eq!(build.context, expected.to_string_lossy());
        assert_eq!(build.dockerfile, "Dockerfile-sample");
    }

    #[test]
    fn remote_build_context_is_not_rooted() {
        let mut project = Project::new("demo");
        project.services = vec![service_with_build(BuildConfig::with_context(
            "https://github.com/acme/app.git",
        ))];

        resolve_paths(&mut project, true).expect("resolve");

        let build = project.services[0].build.as_ref().expect("build");
        assert_eq!(build.context, "https://github.com/acme/app.git");
    }

    #[test]
    fn dockerfile_not_defaulted_for_inline_or_empty_context() {
        let mut project = Project::new("demo");
        project.services = vec![
            service_with_build(BuildConfig {
                dockerfile_inline: Some("FROM scratch".into()),
                ..BuildConfig::with_context(".")
            }),
            service_with_build(BuildConfig::default()),
        ];

        resolve_paths(&mut project, true).expect("resolve");

        assert!(project.services[0].build.as_ref().expect("build").dockerfile.is_empty());
        let empty = project.services[1].build.as_ref().expect("build");
        assert!(empty.context.is_empty());
        assert!(empty.dockerfile.is_empty());
    }
}
