//! `berth services` — list services in start order.

use std::io::Write;

use anyhow::Context;
use berth_loader::graph::DependencyGraph;
use clap::Args;

use super::ProjectArgs;

/// Arguments for the `services` subcommand.
#[derive(Args, Debug)]
pub struct ServicesArgs {
    /// Keep load order instead of start order.
    #[arg(long)]
    pub unordered: bool,
}

/// Executes the `services` command.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or its dependencies form a cycle.
pub fn execute(project_args: &ProjectArgs, args: &ServicesArgs) -> anyhow::Result<()> {
    let project = project_args.load()?;
    let names: Vec<String> = if args.unordered {
        project.service_names().map(ToString::to_string).collect()
    } else {
        DependencyGraph::from_project(&project).startup_order()?
    };

    let mut stdout = std::io::stdout().lock();
    for name in names {
        writeln!(stdout, "{name}").context("failed to write service list")?;
    }
    Ok(())
}
