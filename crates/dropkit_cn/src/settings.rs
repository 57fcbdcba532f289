//! Dropdown settings
//!
//! Every field has a default, so a settings file only lists what it changes:
//!
//! ```toml
//! debounce_ms = 200
//!
//! [placement]
//! max_height = 320.0
//! ```

use std::fs;
use std::path::Path;

use dropkit_layout::PlacementOptions;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Tunables shared by every dropdown controller built with them
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DropdownSettings {
    /// Quiet period before a typed search term is applied
    pub debounce_ms: u64,
    /// Row height used to estimate the list height for placement
    pub item_height: f32,
    /// Floating list placement
    pub placement: PlacementOptions,
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            item_height: 36.0,
            placement: PlacementOptions::default(),
        }
    }
}

impl DropdownSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded dropdown settings");
        Ok(settings)
    }
}
