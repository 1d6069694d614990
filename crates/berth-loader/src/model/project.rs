//! Root project value handed to the normalizer.

use std::collections::BTreeMap;
use std::path::PathBuf;

use berth_common::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

use super::resource::{NetworkConfig, VolumeConfig};
use super::service::ServiceConfig;

/// A fully merged compose project.
///
/// `working_dir`, `compose_files`, and `environment` are loader state and
/// are not part of the textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Project name, used as the prefix of canonical resource names.
    pub name: String,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub working_dir: PathBuf,
    /// Source files the project was loaded from, in load order.
    #[serde(skip)]
    pub compose_files: Vec<PathBuf>,
    /// Variables available for lookups of unset values.
    #[serde(skip)]
    pub environment: BTreeMap<String, String>,
    /// Services in load order.
    #[serde(with = "services_map", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceConfig>,
    /// Networks keyed by the name services use to refer to them.
    #[serde(
        deserialize_with = "nullable_values",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Volumes keyed by the name services use to refer to them.
    #[serde(
        deserialize_with = "nullable_values",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub volumes: BTreeMap<String, VolumeConfig>,
}

impl Project {
    /// Creates an empty project with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses the textual form of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid project document.
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Renders the project in its textual form, keys sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Service names in load order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|s| s.name.as_str())
    }
}

/// Accepts `key:` with an empty body as a default descriptor.
fn nullable_values<'de, D, T>(deserializer: D) -> std::result::Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw = BTreeMap::<String, Option<T>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

/// Services are a sequence in memory and a name-keyed mapping on disk.
mod services_map {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::model::service::ServiceConfig;

    pub fn serialize<S>(services: &[ServiceConfig], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut sorted: Vec<&ServiceConfig> = services.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for service in sorted {
            map.serialize_entry(&service.name, service)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ServiceConfig>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ServicesVisitor)
    }

    struct ServicesVisitor;

    impl<'de> Visitor<'de> for ServicesVisitor {
        type Value = Vec<ServiceConfig>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of service names to service definitions")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut services = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, body)) = access.next_entry::<String, Option<ServiceConfig>>()? {
                let mut service = body.unwrap_or_default();
                service.name = name;
                services.push(service);
            }
            Ok(services)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_keep_document_order() {
        let project = Project::from_yaml(
            "name: demo\nservices:\n  zot:\n    image: a\n  bar:\n    image: b\n  foo:\n",
        )
        .expect("parse");
        let names: Vec<&str> = project.service_names().collect();
        assert_eq!(names, vec!["zot", "bar", "foo"]);
    }

    #[test]
    fn services_serialize_sorted_by_name() {
        let mut project = Project::new("demo");
        project.services = vec![ServiceConfig::new("web"), ServiceConfig::new("api")];
        let yaml = project.to_yaml().expect("serialize");
        assert_eq!(yaml, "name: demo\nservices:\n  api: {}\n  web: {}\n");
    }

    #[test]
    fn empty_resource_bodies_are_accepted() {
        let project =
            Project::from_yaml("name: demo\nnetworks:\n  front:\nvolumes:\n  data:\n").expect("parse");
        assert_eq!(project.networks["front"], NetworkConfig::default());
        assert_eq!(project.volumes["data"], VolumeConfig::default());
    }

    #[test]
    fn loader_state_is_not_serialized() {
        let mut project = Project::new("demo");
        project.working_dir = PathBuf::from("/srv/demo");
        project.compose_files = vec![PathBuf::from("/srv/demo/compose.yaml")];
        let _ = project.environment.insert("FOO".into(), "BAR".into());
        assert_eq!(project.to_yaml().expect("serialize"), "name: demo\n");
    }

    #[test]
    fn lookup_by_service_name() {
        let mut project = Project::new("demo");
        project.services = vec![ServiceConfig::new("db")];
        assert!(project.service("db").is_some());
        assert!(project.service("cache").is_none());
    }
}
