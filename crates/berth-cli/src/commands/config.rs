//! `berth config` — print the normalized project.

use std::io::Write;

use anyhow::Context;
use berth_loader::model::Project;
use clap::{Args, ValueEnum};

use super::ProjectArgs;

/// Output format of the rendered project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Compose YAML.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Executes the `config` command.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, normalized, or rendered.
pub fn execute(project_args: &ProjectArgs, args: &ConfigArgs) -> anyhow::Result<()> {
    let project = project_args.load()?;
    let rendered = render(&project, args.format)?;
    std::io::stdout()
        .write_all(rendered.as_bytes())
        .context("failed to write project")?;
    Ok(())
}

fn render(project: &Project, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Yaml => Ok(project.to_yaml()?),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(project)?;
            json.push('\n');
            Ok(json)
        }
    }
}
