//! Service descriptors and their cross-service relationships.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the project's `services` sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Unique service name. Serialized as the mapping key, not as a field.
    #[serde(skip)]
    pub name: String,
    /// Image build settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    /// Start-order and restart relationships, keyed by target service.
    #[serde(
        deserialize_with = "depends_on_list_or_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub depends_on: BTreeMap<String, ServiceDependency>,
    /// Environment variables. `None` values are looked up in the project environment.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, Option<String>>,
    /// Image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// IPC namespace mode, e.g. `service:<name>` or `host`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipc: String,
    /// Legacy links, `<service>` or `<service>:<alias>`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    /// Network namespace mode, e.g. `service:<name>`, `host`, or `none`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_mode: String,
    /// Attached networks. A `None` value means default attachment settings.
    #[serde(
        deserialize_with = "networks_list_or_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub networks: BTreeMap<String, Option<ServiceNetworkConfig>>,
    /// PID namespace mode, e.g. `service:<name>` or `host`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pid: String,
    /// Image pull policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_policy: Option<String>,
    /// Number of replicas. Not part of the textual form.
    #[serde(skip_serializing)]
    pub scale: Option<u32>,
    /// Volume sources, `<service>[:mode]` or `container:<name>[:mode]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes_from: Vec<String>,
}

impl ServiceConfig {
    /// Creates an empty service with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Build settings of a service image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build context: a local path or a remote URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,
    /// Dockerfile path relative to the context.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dockerfile: String,
    /// Inline Dockerfile content, exclusive with `dockerfile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile_inline: Option<String>,
    /// Build arguments. `None` values are looked up in the project environment.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, Option<String>>,
}

impl BuildConfig {
    /// Build settings with only a context.
    #[must_use]
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            ..Self::default()
        }
    }
}

/// Per-service settings on an attached network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceNetworkConfig {
    /// Extra host names on this network.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Static IPv4 address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    /// Static IPv6 address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
}

/// State the target service must reach before the dependent starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyCondition {
    /// Target container has started.
    #[default]
    #[serde(rename = "service_started")]
    Started,
    /// Target reports healthy.
    #[serde(rename = "service_healthy")]
    Healthy,
    /// Target ran to completion with exit code zero.
    #[serde(rename = "service_completed_successfully")]
    CompletedSuccessfully,
}

/// A `depends_on` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDependency {
    /// Condition the target must satisfy.
    pub condition: DependencyCondition,
    /// Restart the dependent when the target restarts.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub restart: bool,
}

impl ServiceDependency {
    /// Dependency on a started target.
    #[must_use]
    pub const fn started(restart: bool) -> Self {
        Self {
            condition: DependencyCondition::Started,
            restart,
        }
    }
}

/// Short (`[a, b]`) or long (keyed mapping) form of a service-level reference list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrMap<T> {
    List(Vec<String>),
    Map(BTreeMap<String, T>),
}

impl<T> ListOrMap<T> {
    fn into_map(self, default: impl Fn() -> T) -> BTreeMap<String, T> {
        match self {
            Self::List(keys) => keys.into_iter().map(|key| (key, default())).collect(),
            Self::Map(map) => map,
        }
    }
}

fn networks_list_or_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<ServiceNetworkConfig>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ListOrMap::deserialize(deserializer)?.into_map(|| None))
}

/// `depends_on: [db]` means a plain started dependency without restart.
fn depends_on_list_or_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, ServiceDependency>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ListOrMap::deserialize(deserializer)?.into_map(ServiceDependency::default))
}
