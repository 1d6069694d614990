//! Options controlling a normalization pass.

use serde::{Deserialize, Serialize};

/// Load-time options handed to the normalizer by the surrounding loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Rewrite service build contexts to absolute paths under the working directory.
    pub resolve_build_paths: bool,
    /// Fail instead of warning when two resources share a canonical name.
    pub strict_names: bool,
}

impl NormalizeOptions {
    /// Options that only toggle build path resolution.
    #[must_use]
    pub const fn with_build_paths(resolve_build_paths: bool) -> Self {
        Self {
            resolve_build_paths,
            strict_names: false,
        }
    }
}
