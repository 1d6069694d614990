//! Top-level network and volume descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// A project resource that receives a canonical name during normalization.
///
/// External resources are a flag on the record, not a separate type, so
/// the naming rule stays a single function over this trait.
pub trait NamedResource {
    /// Resource kind used in diagnostics.
    const KIND: &'static str;

    /// Current name, empty when none was assigned yet.
    fn name(&self) -> &str;

    /// Replaces the name.
    fn set_name(&mut self, name: String);

    /// Whether the resource pre-exists outside the project.
    fn is_external(&self) -> bool;
}

/// A network declared under the top-level `networks` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Canonical name.
    pub name: String,
    /// Network driver.
    pub driver: Option<String>,
    /// Driver-specific options.
    pub driver_opts: BTreeMap<String, String>,
    /// Whether the network is isolated from the outside.
    pub internal: bool,
    /// Metadata labels.
    pub labels: BTreeMap<String, String>,
    /// Whether the network is managed outside the project.
    pub external: bool,
}

impl NetworkConfig {
    /// Descriptor of an external network known under `name`.
    #[must_use]
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external: true,
            ..Self::default()
        }
    }

    /// Managed network with an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl NamedResource for NetworkConfig {
    const KIND: &'static str = "network";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_external(&self) -> bool {
        self.external
    }
}

/// A volume declared under the top-level `volumes` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Canonical name.
    pub name: String,
    /// Volume driver.
    pub driver: Option<String>,
    /// Driver-specific options.
    pub driver_opts: BTreeMap<String, String>,
    /// Metadata labels.
    pub labels: BTreeMap<String, String>,
    /// Whether the volume is managed outside the project.
    pub external: bool,
}

impl VolumeConfig {
    /// Descriptor of an external volume known under `name`.
    #[must_use]
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external: true,
            ..Self::default()
        }
    }

    /// Managed volume with an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl NamedResource for VolumeConfig {
    const KIND: &'static str = "volume";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_external(&self) -> bool {
        self.external
    }
}

/// Textual form of an external resource: nothing but its name and the marker.
#[derive(Serialize)]
struct ExternalForm<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    external: bool,
}

impl<'a> ExternalForm<'a> {
    const fn new(name: &'a str) -> Self {
        Self {
            name,
            external: true,
        }
    }
}

#[derive(Serialize)]
struct ManagedNetwork<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    driver: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    driver_opts: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    internal: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct ManagedVolume<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    driver: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    driver_opts: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: &'a BTreeMap<String, String>,
}

impl Serialize for NetworkConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.external {
            return ExternalForm::new(&self.name).serialize(serializer);
        }
        ManagedNetwork {
            name: &self.name,
            driver: self.driver.as_deref(),
            driver_opts: &self.driver_opts,
            internal: self.internal,
            labels: &self.labels,
        }
        .serialize(serializer)
    }
}

impl Serialize for VolumeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.external {
            return ExternalForm::new(&self.name).serialize(serializer);
        }
        ManagedVolume {
            name: &self.name,
            driver: self.driver.as_deref(),
            driver_opts: &self.driver_opts,
            labels: &self.labels,
        }
        .serialize(serializer)
    }
}
