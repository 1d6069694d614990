//! In-memory compose project model.
//!
//! Maps are `BTreeMap` so that the serialized form lists keys in
//! lexicographic order. Correctness of the normalizer only depends on
//! key presence, never on iteration order.

pub mod project;
pub mod resource;
pub mod service;

pub use project::Project;
pub use resource::{NamedResource, NetworkConfig, VolumeConfig};
pub use service::{
    BuildConfig, DependencyCondition, ServiceConfig, ServiceDependency, ServiceNetworkConfig,
};
