//! Cache configuration

use serde::Deserialize;

/// Tunables for a [`ReferenceCache`](crate::ReferenceCache)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a fetched entry stays fresh
    pub ttl_ms: u64,
    /// Prefix for keys written to session storage
    pub storage_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 60 * 60 * 1000,
            storage_prefix: "dropkit:refdata:".to_string(),
        }
    }
}

impl CacheConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Set the time-to-live
    pub fn ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Set the storage key prefix
    pub fn storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub(crate) fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.storage_prefix, key)
    }
}
