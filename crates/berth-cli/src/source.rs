//! Single-file project loading for the CLI.
//!
//! Stands in for the full loader: no override merging, `extends`, or
//! interpolation. It only fills in the loader state the normalizer expects.

use std::path::{Path, PathBuf};

use anyhow::Context;
use berth_common::error::BerthError;
use berth_loader::model::Project;

/// Reads `file` and prepares its project for normalization.
///
/// The project name comes from `name_override`, then the file's `name`
/// key, then the base name of the file's directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if no
/// usable project name can be derived.
pub fn load_project(file: &Path, name_override: Option<&str>) -> anyhow::Result<Project> {
    tracing::info!(path = %file.display(), "loading compose file");
    let input = std::fs::read_to_string(file).map_err(|source| BerthError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    let mut project = Project::from_yaml(&input)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    let working_dir = file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    if let Some(name) = name_override {
        project.name = name.to_string();
    }
    if project.name.is_empty() {
        let dir = berth_loader::paths::absolutize(&working_dir)?;
        project.name = dir
            .file_name()
            .map(|base| project_name_from_dir(&base.to_string_lossy()))
            .unwrap_or_default();
    }
    anyhow::ensure!(
        !project.name.is_empty(),
        "cannot derive a project name for {}, pass --project-name",
        file.display()
    );

    project.working_dir = working_dir;
    project.compose_files = vec![file.to_path_buf()];
    project.environment = std::env::vars().collect();
    Ok(project)
}

/// Lowercases a directory name and drops characters not allowed in project names.
fn project_name_from_dir(dir: &str) -> String {
    dir.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_is_sanitized() {
        assert_eq!(project_name_from_dir("My App.v2"), "myappv2");
        assert_eq!(project_name_from_dir("web_stack-1"), "web_stack-1");
    }

    #[test]
    fn load_uses_name_key() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let file = dir.path().join("compose.yaml");
        std::fs::write(&file, "name: shop\nservices:\n  web:\n    image: nginx\n")
            .expect("failed to write");

        let project = load_project(&file, None).expect("load");

        assert_eq!(project.name, "shop");
        assert_eq!(project.working_dir, dir.path());
        assert_eq!(project.compose_files, vec![file]);
        assert!(project.service("web").is_some());
    }

    #[test]
    fn override_beats_name_key() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let file = dir.path().join("compose.yaml");
        std::fs::write(&file, "name: shop\n").expect("failed to write");

        let project = load_project(&file, Some("staging")).expect("load");
        assert_eq!(project.name, "staging");
    }

    #[test]
    fn name_falls_back_to_directory() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let nested = dir.path().join("Web_Stack");
        std::fs::create_dir(&nested).expect("failed to create dir");
        let file = nested.join("compose.yaml");
        std::fs::write(&file, "services:\n  web:\n    image: nginx\n").expect("failed to write");

        let project = load_project(&file, None).expect("load");
        assert_eq!(project.name, "web_stack");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let err = load_project(&dir.path().join("absent.yaml"), None).unwrap_err();
        assert!(err.to_string().contains("absent.yaml"), "got: {err}");
    }
}
