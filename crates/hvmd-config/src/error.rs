//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables were unset or empty.
    #[error("missing environment configuration")]
    MissingEnv {
        /// Names of the missing variables, in lookup order.
        names: Vec<&'static str>,
    },
    /// A port value could not be parsed.
    #[error("invalid database port")]
    InvalidPort {
        /// Offending value.
        value: String,
    },
    /// The connection URL could not be assembled from the settings.
    #[error("invalid database connection settings")]
    InvalidUrl {
        /// Component that was rejected (`host`, `user`, `password`).
        field: &'static str,
    },
    /// A key was empty or contained characters the key file cannot hold.
    #[error("invalid key material")]
    InvalidKey,
    /// The key file could not be parsed.
    #[error("failed to parse key file")]
    KeyFile {
        /// Path of the key file.
        path: PathBuf,
        /// Source parse error.
        source: dotenvy::Error,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the operation.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
