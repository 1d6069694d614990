//! Start ordering of a normalized project using `petgraph`.
//!
//! Builds a directed graph from every service's `depends_on` map and
//! yields services with their dependencies first.

use std::collections::HashMap;

use berth_common::error::{BerthError, Result};
use petgraph::graph::NodeIndex;

use crate::model::Project;

/// A dependency graph of services.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: petgraph::Graph<String, ()>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: petgraph::Graph::new(),
        }
    }

    /// Builds the graph of a project's `depends_on` relationships.
    ///
    /// Dependencies on services the project does not declare are skipped;
    /// reporting them is the validator's job.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        let mut graph = Self::new();
        let nodes: HashMap<&str, NodeIndex> = project
            .service_names()
            .map(|name| (name, graph.add_service(name)))
            .collect();

        for service in &project.services {
            let Some(&dependent) = nodes.get(service.name.as_str()) else {
                continue;
            };
            for target in service.depends_on.keys() {
                match nodes.get(target.as_str()) {
                    Some(&dependency) => graph.add_dependency(dependent, dependency),
                    None => tracing::warn!(
                        service = %service.name,
                        target = %target,
                        "dependency on undeclared service ignored"
                    ),
                }
            }
        }
        graph
    }

    /// Adds a service node to the graph.
    pub fn add_service(&mut self, name: impl Into<String>) -> NodeIndex {
        self.graph.add_node(name.into())
    }

    /// Adds a dependency edge: `dependent` depends on `dependency`.
    ///
    /// The edge points from `dependency` to `dependent` so that a
    /// topological sort yields dependencies first.
    pub fn add_dependency(&mut self, dependent: NodeIndex, dependency: NodeIndex) {
        let _ = self.graph.add_edge(dependency, dependent, ());
    }

    /// Returns service names with every dependency before its dependents.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains a cycle.
    pub fn startup_order(&self) -> Result<Vec<String>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                let service = self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_default();
                Err(BerthError::Config {
                    message: format!("cyclic dependency detected involving service \"{service}\""),
                })
            }
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
