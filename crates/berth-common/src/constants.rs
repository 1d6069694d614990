//! Compose model constants shared by the loader and the CLI.

/// Key of the network every service joins unless it opts out.
pub const DEFAULT_NETWORK: &str = "default";

/// Dockerfile name assumed when a build context declares none.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";

/// Prefix of namespace-sharing modes that target another service.
pub const SERVICE_PREFIX: &str = "service:";

/// Prefix of `volumes_from` entries that target a container outside the project.
pub const CONTAINER_PREFIX: &str = "container:";

/// Separator between the project name and a resource key in canonical names.
pub const NAME_SEPARATOR: &str = "_";

/// Deprecated spelling of the `missing` pull policy.
pub const PULL_POLICY_IF_NOT_PRESENT: &str = "if_not_present";

/// Canonical spelling of the "pull only when absent" policy.
pub const PULL_POLICY_MISSING: &str = "missing";

/// Compose file looked up when none is given on the command line.
pub const DEFAULT_COMPOSE_FILE: &str = "compose.yaml";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "berth";
