//! Unified error types for the berth workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BerthError {
    /// A path could not be made absolute.
    #[error("cannot resolve path {path}: {source}")]
    PathResolution {
        /// Path being resolved.
        path: PathBuf,
        /// Underlying I/O error, usually from reading the current directory.
        source: std::io::Error,
    },

    /// Distinct resources ended up with the same canonical name.
    #[error("{kind} name conflict: {keys:?} all resolve to \"{name}\"")]
    NamingConflict {
        /// Resource kind (`network` or `volume`).
        kind: &'static str,
        /// Shared canonical name.
        name: String,
        /// Keys of the colliding resources, sorted.
        keys: Vec<String>,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The project or the options are invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// YAML serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BerthError>;
