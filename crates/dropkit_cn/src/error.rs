//! Error types for dropkit_cn

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading component settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid TOML for the expected shape
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for dropkit_cn configuration
pub type Result<T> = std::result::Result<T, ConfigError>;
