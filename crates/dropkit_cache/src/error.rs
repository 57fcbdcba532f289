//! Error types for dropkit_cache

use thiserror::Error;

/// Errors returned by cache lookups.
///
/// Cloneable because every caller waiting on a shared fetch receives the
/// same outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The fetch function for `key` failed
    #[error("Fetching {key} failed: {message}")]
    Fetch { key: String, message: String },
}

/// Result type for dropkit_cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
