//! CLI command definitions and dispatch.

pub mod config;
pub mod services;

use std::path::PathBuf;

use berth_common::config::NormalizeOptions;
use berth_common::constants::{BIN_NAME, DEFAULT_COMPOSE_FILE};
use berth_loader::model::Project;
use clap::{Args, Parser, Subcommand};

/// berth — compose project loader.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Project loading options shared by every subcommand.
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Options locating and normalizing the project.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Compose file to load.
    #[arg(short, long, global = true, env = "BERTH_FILE", default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,

    /// Project name, overriding the file's `name` key.
    #[arg(short = 'p', long, global = true, env = "BERTH_PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Rewrite build contexts to absolute paths.
    #[arg(long, global = true)]
    pub resolve_paths: bool,

    /// Fail when two networks or volumes resolve to the same name.
    #[arg(long, global = true)]
    pub strict_names: bool,
}

impl ProjectArgs {
    /// Normalization options selected on the command line.
    #[must_use]
    pub const fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            resolve_build_paths: self.resolve_paths,
            strict_names: self.strict_names,
        }
    }

    /// Loads and normalizes the selected project.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or normalization fails.
    pub fn load(&self) -> anyhow::Result<Project> {
        let mut project = crate::source::load_project(&self.file, self.project_name.as_deref())?;
        berth_loader::normalize::normalize_with(&mut project, &self.options())?;
        Ok(project)
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the normalized project.
    Config(config::ConfigArgs),
    /// List services in start order.
    Services(services::ServicesArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Config(args) => config::execute(&cli.project, &args),
        Command::Services(args) => services::execute(&cli.project, &args),
    }
}
