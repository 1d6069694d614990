//! # berth-loader
//!
//! Normalization stage of the compose project loader.
//!
//! Takes a project that upstream stages already parsed, merged, and
//! interpolated, and turns it into a fully resolved model:
//! - **Paths**: working directory, compose files, and build contexts rooted.
//! - **Naming**: canonical names for networks and volumes, implicit default network.
//! - **Dependencies**: implicit `depends_on` entries from shared namespaces and volumes.
//! - **Defaults**: canonical pull policies and unset values looked up in the project environment.
//! - **Graph**: start ordering of a normalized project.
//!
//! # Example
//!
//! ```rust,no_run
//! use berth_loader::model::Project;
//! use berth_loader::normalize::normalize;
//!
//! let mut project = Project::from_yaml("name: demo\nservices:\n  web:\n    image: nginx\n")?;
//! normalize(&mut project, false)?;
//! assert_eq!(project.networks["default"].name, "demo_default");
//! # Ok::<(), berth_common::error::BerthError>(())
//! ```

pub mod defaults;
pub mod dependencies;
pub mod graph;
pub mod model;
pub mod naming;
pub mod normalize;
pub mod paths;
